use std::{thread::sleep, time::Instant};

use crate::config::TickRate;

pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last_tick: None }
    }

    /// Blocks until at least one frame at `rate` has passed since the previous call.
    pub fn wait_for_next_tick(&mut self, rate: &TickRate) {
        if let Some(last) = self.last_tick {
            let frame = rate.frame_duration();
            let elapsed = last.elapsed();
            if elapsed < frame {
                sleep(frame - elapsed);
            }
        }

        self.last_tick = Some(Instant::now());
    }
}
