use std::collections::VecDeque;

use ringbuf::{traits::Consumer, HeapCons};

use super::{FrameStatus, SampleSource};

/// Rolling view over the most recent `frame_len` samples of a ring buffer.
///
/// Each read drains whatever the producer pushed since the last read, so
/// consecutive frames overlap when the host polls faster than audio arrives.
pub struct FrameWindow {
    consumer: HeapCons<f32>,
    window: VecDeque<f32>,
    frame_len: usize,
    fresh: bool,
}

impl FrameWindow {
    pub fn new(consumer: HeapCons<f32>, frame_len: usize) -> Self {
        Self {
            consumer,
            window: VecDeque::with_capacity(frame_len),
            frame_len,
            fresh: false,
        }
    }

    fn drain(&mut self) {
        while let Some(sample) = self.consumer.try_pop() {
            if self.window.len() == self.frame_len {
                self.window.pop_front();
            }
            self.window.push_back(sample);
            self.fresh = true;
        }
    }
}

impl SampleSource for FrameWindow {
    fn frame_len(&self) -> usize {
        self.frame_len
    }

    fn read_frame(&mut self, buf: &mut Vec<f32>) -> FrameStatus {
        self.drain();

        if !self.fresh || self.window.len() < self.frame_len {
            return FrameStatus::Pending;
        }

        buf.clear();
        buf.extend(self.window.iter().copied());
        self.fresh = false;
        FrameStatus::Ready
    }
}
