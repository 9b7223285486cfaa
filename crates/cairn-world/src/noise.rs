use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::worldgen::NoiseParams;

/// Multi-octave coherent noise. Every noise-driven decision in the generator
/// goes through this one primitive; layers differ only by parameters.
///
/// The backing `FastNoiseLite` is a single Perlin octave at frequency 1; the
/// octave loop, normalization and turbulence happen here so the summation is
/// identical for 2D and 3D sampling.
pub struct OctaveNoise {
    base: FastNoiseLite,
    params: NoiseParams,
}

impl OctaveNoise {
    pub fn new(seed: i32, params: NoiseParams) -> Self {
        let mut base = FastNoiseLite::with_seed(seed);
        base.set_noise_type(Some(NoiseType::Perlin));
        base.set_frequency(Some(1.0));
        Self { base, params }
    }

    #[inline]
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Range `[-1, 1]`, or `[0, 1]` when turbulent.
    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        let [ox, oy, _] = self.params.offset;
        let (x, y) = (x + ox, y + oy);
        self.accumulate(|f| self.base.get_noise_2d(x * f, y * f))
    }

    pub fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        let [ox, oy, oz] = self.params.offset;
        let (x, y, z) = (x + ox, y + oy, z + oz);
        self.accumulate(|f| self.base.get_noise_3d(x * f, y * f, z * f))
    }

    fn accumulate(&self, mut octave: impl FnMut(f32) -> f32) -> f32 {
        let p = &self.params;
        let mut amp = 1.0_f32;
        let mut freq = p.frequency;
        let mut sum = 0.0_f32;
        let mut norm = 0.0_f32;
        for _ in 0..p.octaves.max(1) {
            let mut n = octave(freq);
            if p.turbulent {
                n = n.abs();
            }
            sum += n * amp;
            norm += amp;
            amp *= p.persistence;
            freq *= p.lacunarity;
        }
        if norm > 0.0 { sum / norm } else { 0.0 }
    }
}

impl std::fmt::Debug for OctaveNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctaveNoise")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
