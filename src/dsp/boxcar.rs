//! Moving-average (boxcar) filter over running sums.

/*
Boxcar Filter
=============

A boxcar of length L outputs the mean of the last L inputs. The naive form
re-sums L samples every call; we keep L running sums instead, each one
started at a different offset:

    sums[k] collects every input since slot k was last emitted

Every call:

  1. add the input to all L sums
  2. emit sums[idx] / L, which now holds exactly the last L inputs
  3. zero sums[idx] so it starts collecting the next window
  4. idx = (idx + 1) mod L

Impulse of 100 into a length-3 boxcar, input [0, 0, 100, 0, 0, 0]:

    call   input   sums after add    emit      idx
    0      0       [0,   0,   0  ]   0/3 = 0    0
    1      0       [0,   0,   0  ]   0/3 = 0    1
    2      100     [100, 100, 100]   100/3=33   2
    3      0       [100, 100, 0  ]   100/3=33   0
    4      0       [0,   100, 0  ]   100/3=33   1
    5      0       [0,   0,   0  ]   0/3 = 0    2

Caller contract: exactly one call per sample. The filter has no notion of
time, so skipping calls shifts the window.

Changing the length reallocates the sums and discards history.
*/

use crate::dsp::fixed::clip16;

/// Boxcar lengths outside this range are clamped.
pub const MAX_LENGTH: usize = 1024;

#[derive(Debug, Clone)]
pub struct Boxcar {
    sums: Vec<i32>,
    idx: usize,
}

impl Boxcar {
    pub fn new(length: usize) -> Self {
        let length = length.clamp(1, MAX_LENGTH);
        Self {
            sums: vec![0; length],
            idx: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Resize the window. A no-op when the length is unchanged, otherwise
    /// the history is zeroed.
    pub fn set_length(&mut self, length: usize) {
        let length = length.clamp(1, MAX_LENGTH);
        if length != self.sums.len() {
            *self = Self::new(length);
        }
    }

    #[inline]
    pub fn process(&mut self, input: i16) -> i16 {
        let input = input as i32;
        for sum in self.sums.iter_mut() {
            *sum += input;
        }
        let out = self.sums[self.idx] / self.sums.len() as i32;
        self.sums[self.idx] = 0;
        self.idx = (self.idx + 1) % self.sums.len();
        clip16(out)
    }
}
