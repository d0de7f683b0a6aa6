// ============================================
// Frame Limiter - Ограничение частоты кадров
// ============================================

use std::time::{Duration, Instant};

/// Планировщик кадров с фиксированной частотой
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame_time: Duration,
    next_frame: Instant,
}

impl FrameLimiter {
    /// `fps` = 0 трактуется как 1
    pub fn new(fps: u32, now: Instant) -> Self {
        let frame_time = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self { frame_time, next_frame: now }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Когда наступит следующий кадр
    pub fn next_deadline(&self) -> Instant {
        self.next_frame
    }

    /// Пора ли делать кадр
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Отметить выполненный кадр. При отставании больше кадра
    /// расписание сдвигается, а не догоняется пачкой кадров.
    pub fn mark_frame(&mut self, now: Instant) {
        self.next_frame += self.frame_time;
        if self.next_frame <= now {
            self.next_frame = now + self.frame_time;
        }
    }
}
