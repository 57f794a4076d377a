//! `Math.random` as a `RandomSource`.

use js_sys::Math;
use stickynotes_core::RandomSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = (Math::random() * len as f64).floor() as usize;
        index.min(len - 1)
    }

    fn random_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        for byte in &mut bytes {
            *byte = (Math::random() * 256.0).floor() as u8;
        }
        bytes
    }
}
