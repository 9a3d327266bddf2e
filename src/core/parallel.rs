use crate::core::geometry::Int2;
use crate::core::packet::{PacketRegion, PACKET_DIM};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Shared FIFO work queue. One mutex around push/pop; `pop` never blocks
/// and reports exhaustion through `None`, which workers treat as ordinary
/// termination.
pub struct TsQueue<T> {
    q: Mutex<VecDeque<T>>,
}

impl<T> TsQueue<T> {
    pub fn new() -> Self {
        TsQueue {
            q: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, item: T) {
        self.q.lock().unwrap().push_back(item);
    }

    pub fn pop(&self) -> Option<T> {
        self.q.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.q.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.lock().unwrap().is_empty()
    }
}

impl<T> std::iter::FromIterator<T> for TsQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TsQueue {
            q: Mutex::new(iter.into_iter().collect()),
        }
    }
}

/// Partitions the image into non-overlapping PACKET_DIM-square tiles,
/// clamped at the right and top edges. Every pixel lands in exactly one
/// tile; workers therefore own disjoint pixel ranges and the output buffer
/// needs no locking.
pub fn tile_regions(width: usize, height: usize) -> Vec<PacketRegion> {
    let mut regions = Vec::new();
    let dim = PACKET_DIM as i32;
    let (w, h) = (width as i32, height as i32);
    let mut y0 = 0;
    while y0 < h {
        let y1 = (y0 + dim - 1).min(h - 1);
        let mut x0 = 0;
        while x0 < w {
            let x1 = (x0 + dim - 1).min(w - 1);
            regions.push(PacketRegion::new(
                Int2::new(x0, y0),
                Int2::new(x1, y0),
                Int2::new(x0, y1),
                Int2::new(x1, y1),
            ));
            x0 += dim;
        }
        y0 += dim;
    }
    regions
}
