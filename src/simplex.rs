//! Simplex noise field generator.
//!
//! Seedable, deterministic smooth pseudo-random scalar fields over 2, 3 and
//! 4 dimensions, free of the grid-aligned artifacts of lattice value noise.
//! All state is fixed at construction; every sample method is a pure read,
//! so one generator can serve any number of concurrent readers.

use crate::util::Rng;

/// Deterministic simplex noise over 2/3/4 dimensions.
///
/// Holds a 256-entry permutation table (a bijection on [0,255] built by a
/// seeded Fisher-Yates shuffle), duplicated to 512 entries so lattice
/// indexing never needs an explicit wrap, plus a mod-12 copy that selects
/// among the twelve 3D gradient directions.
pub struct SimplexNoise {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl SimplexNoise {
    /// Build the permutation tables from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Rng::new(seed);

        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        // Fisher-Yates, high index down
        for i in (1..256).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }

        Self { perm, perm_mod12 }
    }

    /// 2D simplex noise in approximately [-1, 1].
    ///
    /// Skews the input onto a triangular lattice, then sums the radial
    /// falloff contribution of the three cell corners.
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let f2 = 0.5 * (3.0_f64.sqrt() - 1.0);
        let g2 = (3.0 - 3.0_f64.sqrt()) / 6.0;

        // Skew to determine the simplex cell
        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Which triangle of the skewed square are we in?
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let mut n = 0.0;

        let t0 = 0.5 - x0 * x0 - y0 * y0;
        if t0 > 0.0 {
            let h = self.perm[ii + self.perm[jj] as usize];
            let t0 = t0 * t0;
            n += t0 * t0 * grad2(h, x0, y0);
        }
        let t1 = 0.5 - x1 * x1 - y1 * y1;
        if t1 > 0.0 {
            let h = self.perm[ii + i1 + self.perm[jj + j1] as usize];
            let t1 = t1 * t1;
            n += t1 * t1 * grad2(h, x1, y1);
        }
        let t2 = 0.5 - x2 * x2 - y2 * y2;
        if t2 > 0.0 {
            let h = self.perm[ii + 1 + self.perm[jj + 1] as usize];
            let t2 = t2 * t2;
            n += t2 * t2 * grad2(h, x2, y2);
        }

        70.0 * n
    }

    /// 3D simplex noise in approximately [-1, 1].
    ///
    /// Tetrahedral lattice, four corner contributions.
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        const F3: f64 = 1.0 / 3.0;
        const G3: f64 = 1.0 / 6.0;

        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        // Rank the offsets to pick the traversal order through the
        // tetrahedron: (i1,j1,k1) is the second corner, (i2,j2,k2) the third.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;

        let mut n = 0.0;

        let t0 = 0.6 - x0 * x0 - y0 * y0 - z0 * z0;
        if t0 > 0.0 {
            let gi = self.perm_mod12
                [ii + self.perm[jj + self.perm[kk] as usize] as usize];
            let t0 = t0 * t0;
            n += t0 * t0 * grad3(gi, x0, y0, z0);
        }
        let t1 = 0.6 - x1 * x1 - y1 * y1 - z1 * z1;
        if t1 > 0.0 {
            let gi = self.perm_mod12
                [ii + i1 + self.perm[jj + j1 + self.perm[kk + k1] as usize] as usize];
            let t1 = t1 * t1;
            n += t1 * t1 * grad3(gi, x1, y1, z1);
        }
        let t2 = 0.6 - x2 * x2 - y2 * y2 - z2 * z2;
        if t2 > 0.0 {
            let gi = self.perm_mod12
                [ii + i2 + self.perm[jj + j2 + self.perm[kk + k2] as usize] as usize];
            let t2 = t2 * t2;
            n += t2 * t2 * grad3(gi, x2, y2, z2);
        }
        let t3 = 0.6 - x3 * x3 - y3 * y3 - z3 * z3;
        if t3 > 0.0 {
            let gi = self.perm_mod12
                [ii + 1 + self.perm[jj + 1 + self.perm[kk + 1] as usize] as usize];
            let t3 = t3 * t3;
            n += t3 * t3 * grad3(gi, x3, y3, z3);
        }

        32.0 * n
    }

    /// 4D simplex noise in approximately [-1, 1].
    ///
    /// The fourth dimension is used by the mesh deformer as time, giving
    /// seamless looping-free surface motion. All five corners of the
    /// 4-simplex contribute; dropping the last one skews the field.
    pub fn noise4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let f4 = (5.0_f64.sqrt() - 1.0) / 4.0;
        let g4 = (5.0 - 5.0_f64.sqrt()) / 20.0;

        let s = (x + y + z + w) * f4;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let l = (w + s).floor();
        let t = (i + j + k + l) * g4;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);
        let w0 = w - (l - t);

        // Pairwise-rank the offsets; the ranks decide per-axis how early
        // that axis steps while walking the five corners of the 4-simplex.
        let mut rank_x = 0;
        let mut rank_y = 0;
        let mut rank_z = 0;
        let mut rank_w = 0;
        if x0 > y0 { rank_x += 1 } else { rank_y += 1 }
        if x0 > z0 { rank_x += 1 } else { rank_z += 1 }
        if x0 > w0 { rank_x += 1 } else { rank_w += 1 }
        if y0 > z0 { rank_y += 1 } else { rank_z += 1 }
        if y0 > w0 { rank_y += 1 } else { rank_w += 1 }
        if z0 > w0 { rank_z += 1 } else { rank_w += 1 }

        let i1 = usize::from(rank_x >= 3);
        let j1 = usize::from(rank_y >= 3);
        let k1 = usize::from(rank_z >= 3);
        let l1 = usize::from(rank_w >= 3);
        let i2 = usize::from(rank_x >= 2);
        let j2 = usize::from(rank_y >= 2);
        let k2 = usize::from(rank_z >= 2);
        let l2 = usize::from(rank_w >= 2);
        let i3 = usize::from(rank_x >= 1);
        let j3 = usize::from(rank_y >= 1);
        let k3 = usize::from(rank_z >= 1);
        let l3 = usize::from(rank_w >= 1);

        let x1 = x0 - i1 as f64 + g4;
        let y1 = y0 - j1 as f64 + g4;
        let z1 = z0 - k1 as f64 + g4;
        let w1 = w0 - l1 as f64 + g4;
        let x2 = x0 - i2 as f64 + 2.0 * g4;
        let y2 = y0 - j2 as f64 + 2.0 * g4;
        let z2 = z0 - k2 as f64 + 2.0 * g4;
        let w2 = w0 - l2 as f64 + 2.0 * g4;
        let x3 = x0 - i3 as f64 + 3.0 * g4;
        let y3 = y0 - j3 as f64 + 3.0 * g4;
        let z3 = z0 - k3 as f64 + 3.0 * g4;
        let w3 = w0 - l3 as f64 + 3.0 * g4;
        let x4 = x0 - 1.0 + 4.0 * g4;
        let y4 = y0 - 1.0 + 4.0 * g4;
        let z4 = z0 - 1.0 + 4.0 * g4;
        let w4 = w0 - 1.0 + 4.0 * g4;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;
        let ll = (l as i64 & 255) as usize;

        let mut n = 0.0;

        let t0 = 0.6 - x0 * x0 - y0 * y0 - z0 * z0 - w0 * w0;
        if t0 > 0.0 {
            let h = self.perm
                [ii + self.perm[jj + self.perm[kk + self.perm[ll] as usize] as usize] as usize];
            let t0 = t0 * t0;
            n += t0 * t0 * grad4(h, x0, y0, z0, w0);
        }
        let t1 = 0.6 - x1 * x1 - y1 * y1 - z1 * z1 - w1 * w1;
        if t1 > 0.0 {
            let h = self.perm[ii
                + i1
                + self.perm[jj + j1 + self.perm[kk + k1 + self.perm[ll + l1] as usize] as usize]
                    as usize];
            let t1 = t1 * t1;
            n += t1 * t1 * grad4(h, x1, y1, z1, w1);
        }
        let t2 = 0.6 - x2 * x2 - y2 * y2 - z2 * z2 - w2 * w2;
        if t2 > 0.0 {
            let h = self.perm[ii
                + i2
                + self.perm[jj + j2 + self.perm[kk + k2 + self.perm[ll + l2] as usize] as usize]
                    as usize];
            let t2 = t2 * t2;
            n += t2 * t2 * grad4(h, x2, y2, z2, w2);
        }
        let t3 = 0.6 - x3 * x3 - y3 * y3 - z3 * z3 - w3 * w3;
        if t3 > 0.0 {
            let h = self.perm[ii
                + i3
                + self.perm[jj + j3 + self.perm[kk + k3 + self.perm[ll + l3] as usize] as usize]
                    as usize];
            let t3 = t3 * t3;
            n += t3 * t3 * grad4(h, x3, y3, z3, w3);
        }
        let t4 = 0.6 - x4 * x4 - y4 * y4 - z4 * z4 - w4 * w4;
        if t4 > 0.0 {
            let h = self.perm[ii
                + 1
                + self.perm[jj + 1 + self.perm[kk + 1 + self.perm[ll + 1] as usize] as usize]
                    as usize];
            let t4 = t4 * t4;
            n += t4 * t4 * grad4(h, x4, y4, z4, w4);
        }

        27.0 * n
    }
}

/// 2D gradient: hash picks one of 8 axis/diagonal directions, returns its
/// dot product with the corner offset.
#[inline]
fn grad2(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => x - y,
        2 => -x + y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

/// 3D gradient: index (already reduced mod 12) picks one of the twelve
/// cube-edge directions.
#[inline]
fn grad3(gi: u8, x: f64, y: f64, z: f64) -> f64 {
    match gi {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x + z,
        5 => -x + z,
        6 => x - z,
        7 => -x - z,
        8 => y + z,
        9 => -y + z,
        10 => y - z,
        _ => -y - z,
    }
}

/// 4D gradient: hash picks one of the 32 permutations of (0, +-1, +-1, +-1).
#[inline]
fn grad4(hash: u8, x: f64, y: f64, z: f64, w: f64) -> f64 {
    match hash & 31 {
        0 => y + z + w,
        1 => y + z - w,
        2 => y - z + w,
        3 => y - z - w,
        4 => -y + z + w,
        5 => -y + z - w,
        6 => -y - z + w,
        7 => -y - z - w,
        8 => x + z + w,
        9 => x + z - w,
        10 => x - z + w,
        11 => x - z - w,
        12 => -x + z + w,
        13 => -x + z - w,
        14 => -x - z + w,
        15 => -x - z - w,
        16 => x + y + w,
        17 => x + y - w,
        18 => x - y + w,
        19 => x - y - w,
        20 => -x + y + w,
        21 => -x + y - w,
        22 => -x - y + w,
        23 => -x - y - w,
        24 => x + y + z,
        25 => x + y - z,
        26 => x - y + z,
        27 => x - y - z,
        28 => -x + y + z,
        29 => -x + y - z,
        30 => -x - y + z,
        _ => -x - y - z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;

    // Recorded baselines for seed 42. Pinned to guard against accidental
    // changes to the permutation construction or the corner accumulation;
    // the 4D fixture in particular pins the five-corner summation.
    const BASELINE_2D: f64 = -0.069344635075907934;
    const BASELINE_3D: f64 = 0.18725710286256961;
    const BASELINE_4D: f64 = 0.049016201606369943;

    #[test]
    fn permutation_is_bijection_for_any_seed() {
        for seed in [0, 1, 42, 1337, u64::MAX] {
            let gen = SimplexNoise::new(seed);
            let mut seen = [false; 256];
            for &v in &gen.perm[..256] {
                assert!(!seen[v as usize], "value {} repeated (seed {})", v, seed);
                seen[v as usize] = true;
            }
            // Duplicated half mirrors the first
            for i in 0..256 {
                assert_eq!(gen.perm[i], gen.perm[i + 256]);
                assert_eq!(gen.perm_mod12[i], gen.perm[i] % 12);
            }
        }
    }

    #[test]
    fn shuffle_differs_across_seeds() {
        let a = SimplexNoise::new(1);
        let b = SimplexNoise::new(2);
        assert_ne!(a.perm[..256], b.perm[..256]);
    }

    #[test]
    fn noise_is_deterministic() {
        let gen = SimplexNoise::new(7);
        let again = SimplexNoise::new(7);
        for i in 0..100 {
            let x = i as f64 * 0.173 - 8.0;
            let y = i as f64 * 0.311 + 3.0;
            let z = i as f64 * 0.097 - 1.5;
            let w = i as f64 * 0.059;
            assert_eq!(gen.noise2d(x, y), gen.noise2d(x, y));
            assert_eq!(gen.noise2d(x, y), again.noise2d(x, y));
            assert_eq!(gen.noise3d(x, y, z), again.noise3d(x, y, z));
            assert_eq!(gen.noise4d(x, y, z, w), again.noise4d(x, y, z, w));
        }
    }

    #[test]
    fn noise_stays_within_unit_bound() {
        let gen = SimplexNoise::new(42);
        let mut rng = Rng::new(99);
        let eps = 0.05;
        for _ in 0..20_000 {
            let x = f64::from(rng.range_f32(-50.0, 50.0));
            let y = f64::from(rng.range_f32(-50.0, 50.0));
            let z = f64::from(rng.range_f32(-50.0, 50.0));
            let w = f64::from(rng.range_f32(-50.0, 50.0));
            assert!(gen.noise2d(x, y).abs() <= 1.0 + eps, "2d out of range at ({x},{y})");
            assert!(gen.noise3d(x, y, z).abs() <= 1.0 + eps, "3d out of range");
            assert!(gen.noise4d(x, y, z, w).abs() <= 1.0 + eps, "4d out of range");
        }
    }

    #[test]
    fn noise_is_continuous() {
        // Nearby samples must stay within an empirically-fit Lipschitz bound:
        // no seams, no popping.
        let gen = SimplexNoise::new(5);
        let mut rng = Rng::new(17);
        let delta = 1e-3;
        let k = 25.0;
        for _ in 0..5_000 {
            let x = f64::from(rng.range_f32(-20.0, 20.0));
            let y = f64::from(rng.range_f32(-20.0, 20.0));
            let z = f64::from(rng.range_f32(-20.0, 20.0));
            let w = f64::from(rng.range_f32(-20.0, 20.0));
            let d2 = (gen.noise2d(x + delta, y) - gen.noise2d(x, y)).abs();
            let d3 = (gen.noise3d(x, y + delta, z) - gen.noise3d(x, y, z)).abs();
            let d4 = (gen.noise4d(x, y, z + delta, w) - gen.noise4d(x, y, z, w)).abs();
            assert!(d2 < k * delta, "2d jump {} at ({x},{y})", d2);
            assert!(d3 < k * delta, "3d jump {}", d3);
            assert!(d4 < k * delta, "4d jump {}", d4);
        }
    }

    #[test]
    fn noise2d_matches_recorded_baseline() {
        let gen = SimplexNoise::new(42);
        assert!((gen.noise2d(0.37, 1.92) - BASELINE_2D).abs() < 1e-9);
    }

    #[test]
    fn noise3d_matches_recorded_baseline() {
        let gen = SimplexNoise::new(42);
        assert!((gen.noise3d(0.37, 1.92, -4.11) - BASELINE_3D).abs() < 1e-9);
    }

    #[test]
    fn noise4d_matches_recorded_baseline() {
        // Also pins the choice to accumulate all five simplex corners.
        let gen = SimplexNoise::new(42);
        assert!((gen.noise4d(0.37, 1.92, -4.11, 7.03) - BASELINE_4D).abs() < 1e-9);
    }
}
