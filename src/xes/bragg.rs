//! # Bragg 角 / 能量 / 平台步数换算
//!
//! 直线平台编码器位置、Bragg 角与光子能量之间的闭式换算，
//! 以及在步数空间中平移谱图能量轴。
//!
//! ## 换算链
//! ```text
//! energy --bragg_angle--> angle --steps_from_angle--> steps
//! steps --angle_from_steps--> angle --bragg_energy--> energy
//! ```
//!
//! 平台位置只确定 sin(2θ)，θ 与 90° − θ 对应同一位置。
//! `angle_from_steps` 总是返回 [45°, 135°] 的高角支，
//! 低角支的数据由 `BraggBranch` 折回。
//!
//! ## 依赖关系
//! - 被 `commands/shift.rs`, `commands/convert.rs` 调用
//! - 使用 `xes/crystal.rs`, `xes/geometry.rs`
//! - 使用 `models/spectrum.rs`

use crate::error::{Result, XesError};
use crate::models::Spectrum;
use crate::xes::crystal::AnalyzerConfig;
use crate::xes::geometry::{SpectrometerGeometry, ROWLAND_DIAMETER};

/// Bragg 角所在分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraggBranch {
    /// θ < 45°
    Low,
    /// θ >= 45°
    High,
}

impl BraggBranch {
    /// 判断角度所在分支
    pub fn of(angle: f64) -> Self {
        if angle < 45.0 {
            BraggBranch::Low
        } else {
            BraggBranch::High
        }
    }

    /// 将 `angle_from_steps` 的高角支结果折回本分支
    pub fn fold(self, angle: f64) -> f64 {
        match self {
            BraggBranch::High => angle,
            BraggBranch::Low => 90.0 - angle,
        }
    }
}

/// 平台步数 -> Bragg 角（度）
pub fn angle_from_steps(steps: f64, geometry: &SpectrometerGeometry) -> Result<f64> {
    geometry.validate()?;

    let net_offset = steps * geometry.mm_per_step();
    let offset_midplane = net_offset + geometry.midplane_offset();
    let sin_2theta = offset_midplane * 2.0 * geometry.cos_psi() / ROWLAND_DIAMETER;

    // NaN 也落在区间外
    if !(-1.0..=1.0).contains(&sin_2theta) {
        return Err(XesError::domain(
            "angle_from_steps",
            "sin(2θ)",
            sin_2theta,
            steps,
        ));
    }

    let theta = sin_2theta.asin() / 2.0;
    Ok(90.0 - theta.to_degrees())
}

/// Bragg 角（度）-> 平台步数
pub fn steps_from_angle(angle: f64, geometry: &SpectrometerGeometry) -> Result<f64> {
    geometry.validate()?;

    if !angle.is_finite() {
        return Err(XesError::domain("steps_from_angle", "angle", angle, angle));
    }

    let theta = (90.0 - angle).to_radians();
    let sin_2theta = (2.0 * theta).sin();
    let offset_midplane = sin_2theta / 2.0 / geometry.cos_psi() * ROWLAND_DIAMETER;
    let net_offset = offset_midplane - geometry.midplane_offset();
    Ok(net_offset * geometry.steps_per_rev / geometry.mm_per_rev)
}

/// 能量 (eV) -> Bragg 角（度）
pub fn bragg_angle(energy: f64, analyzer: &AnalyzerConfig) -> Result<f64> {
    if !energy.is_finite() || energy <= 0.0 {
        return Err(XesError::domain("bragg_angle", "energy", energy, energy));
    }

    let ratio = analyzer.reference_energy() / energy;
    if ratio > 1.0 {
        return Err(XesError::domain("bragg_angle", "E0/E", ratio, energy));
    }

    Ok(ratio.asin().to_degrees())
}

/// Bragg 角（度）-> 能量 (eV)
pub fn bragg_energy(angle: f64, analyzer: &AnalyzerConfig) -> Result<f64> {
    let sin_angle = angle.to_radians().sin();
    if !sin_angle.is_finite() || sin_angle.abs() < 1e-12 {
        return Err(XesError::domain(
            "bragg_energy",
            "sin(angle)",
            sin_angle,
            angle,
        ));
    }

    Ok(analyzer.reference_energy() / sin_angle)
}

/// 能量 (eV) -> 平台步数
pub fn steps_from_energy(
    energy: f64,
    analyzer: &AnalyzerConfig,
    geometry: &SpectrometerGeometry,
) -> Result<f64> {
    steps_from_angle(bragg_angle(energy, analyzer)?, geometry)
}

/// 在平台步数空间中平移谱图
///
/// 计算把 `reference_energy` 处的特征移动 `shift` eV 所需的平台位移，
/// 再把同一位移施加到能量轴上的每个点。强度保持不变。
/// 任一点越出定义域即整体失败。
pub fn shift_spectrum(
    spectrum: &Spectrum,
    reference_energy: f64,
    shift: f64,
    analyzer: &AnalyzerConfig,
    geometry: &SpectrometerGeometry,
) -> Result<Spectrum> {
    geometry.validate()?;

    if !shift.is_finite() {
        return Err(XesError::domain("shift_spectrum", "shift", shift, shift));
    }

    let current = steps_from_energy(reference_energy, analyzer, geometry)?;
    let target = steps_from_energy(reference_energy + shift, analyzer, geometry)?;
    let step_delta = target - current;

    let energy = spectrum
        .energy()
        .iter()
        .map(|&x| {
            let angle = bragg_angle(x, analyzer)?;
            let branch = BraggBranch::of(angle);
            let steps = steps_from_angle(angle, geometry)? + step_delta;
            let shifted = branch.fold(angle_from_steps(steps, geometry)?);
            bragg_energy(shifted, analyzer)
        })
        .collect::<Result<Vec<f64>>>()?;

    spectrum.with_energy(energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xes::crystal::{Material, HC};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {actual} ≈ {expected} (±{tol})"
        );
    }

    fn si(h: i32, k: i32, l: i32) -> AnalyzerConfig {
        AnalyzerConfig::new(Material::Si, h, k, l).unwrap()
    }

    fn energy_grid(start: f64, stop: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_steps_round_trip() {
        let geometry = SpectrometerGeometry::default();
        let mut steps = -1_500_000.0;
        while steps <= 2_000_000.0 {
            let angle = angle_from_steps(steps, &geometry).unwrap();
            let back = steps_from_angle(angle, &geometry).unwrap();
            assert_close(back, steps, 1e-9 * f64::max(steps.abs(), 1e3));
            steps += 12_345.0;
        }
    }

    #[test]
    fn test_steps_round_trip_other_geometry() {
        let geometry = SpectrometerGeometry::new(5.0, 4000.0, 20.0, 15.0).unwrap();
        for steps in [-50_000.0, -1.0, 0.0, 3.5, 10_000.0, 300_000.0] {
            let angle = angle_from_steps(steps, &geometry).unwrap();
            let back = steps_from_angle(angle, &geometry).unwrap();
            assert_close(back, steps, 1e-9 * f64::max(steps.abs(), 1e3));
        }
    }

    #[test]
    fn test_bragg_round_trip() {
        let ge_620 = AnalyzerConfig::new(Material::Ge, 6, 2, 0).unwrap();
        for analyzer in [si(1, 1, 1), si(4, 4, 4), ge_620] {
            let e0 = analyzer.reference_energy();
            for energy in energy_grid(e0 * 1.01, 25_000.0, 40) {
                let angle = bragg_angle(energy, &analyzer).unwrap();
                let back = bragg_energy(angle, &analyzer).unwrap();
                assert_close(back, energy, 1e-9 * energy);
            }
        }
    }

    #[test]
    fn test_concrete_si_111_scenario() {
        let analyzer = si(1, 1, 1);
        let geometry = SpectrometerGeometry::default();

        let d = 5.43095 / 3.0_f64.sqrt();
        let expected = (HC / (2.0 * d * 8333.0)).asin().to_degrees();
        let angle = bragg_angle(8333.0, &analyzer).unwrap();
        assert_close(angle, expected, 1e-12);

        let steps = steps_from_angle(angle, &geometry).unwrap();
        let raw = angle_from_steps(steps, &geometry).unwrap();
        // 13.7° 与 76.3° 对应同一平台位置
        assert_close(raw, 90.0 - angle, 1e-6);
        assert_close(BraggBranch::of(angle).fold(raw), angle, 1e-6);
        assert_close(steps_from_angle(raw, &geometry).unwrap(), steps, 1e-6);
    }

    #[test]
    fn test_high_branch_round_trip_is_identity() {
        let analyzer = si(4, 4, 4);
        let geometry = SpectrometerGeometry::default();
        let angle = bragg_angle(8333.0, &analyzer).unwrap();
        assert_eq!(BraggBranch::of(angle), BraggBranch::High);

        let steps = steps_from_angle(angle, &geometry).unwrap();
        assert_close(angle_from_steps(steps, &geometry).unwrap(), angle, 1e-6);
    }

    #[test]
    fn test_domain_rejection() {
        let analyzer = si(1, 1, 1);
        let geometry = SpectrometerGeometry::default();

        assert!(matches!(
            bragg_angle(0.0, &analyzer),
            Err(XesError::Domain {
                operation: "bragg_angle",
                ..
            })
        ));
        assert!(matches!(
            bragg_angle(-8000.0, &analyzer),
            Err(XesError::Domain { .. })
        ));
        // 低于 hc/2d 无法反射
        assert!(matches!(
            bragg_angle(1500.0, &analyzer),
            Err(XesError::Domain { quantity: "E0/E", .. })
        ));
        assert!(matches!(
            angle_from_steps(1e9, &geometry),
            Err(XesError::Domain {
                operation: "angle_from_steps",
                ..
            })
        ));
        assert!(matches!(
            bragg_energy(0.0, &analyzer),
            Err(XesError::Domain { .. })
        ));
        assert!(matches!(
            bragg_energy(180.0, &analyzer),
            Err(XesError::Domain { .. })
        ));
    }

    #[test]
    fn test_degenerate_geometry_is_configuration_error() {
        let geometry = SpectrometerGeometry {
            steps_per_rev: 0.0,
            ..SpectrometerGeometry::default()
        };
        assert!(matches!(
            angle_from_steps(100.0, &geometry),
            Err(XesError::Configuration(_))
        ));
        assert!(matches!(
            steps_from_angle(70.0, &geometry),
            Err(XesError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_shift_identity() {
        let geometry = SpectrometerGeometry::default();
        // 高角支 Si(444) 与低角支 Si(111)
        for analyzer in [si(4, 4, 4), si(1, 1, 1)] {
            let energy = energy_grid(8300.0, 8360.0, 61);
            let intensity: Vec<f64> = (0..61).map(|i| (i * i) as f64).collect();
            let spectrum = Spectrum::new(energy, intensity).unwrap();

            let shifted = shift_spectrum(&spectrum, 8333.0, 0.0, &analyzer, &geometry).unwrap();
            for (a, b) in shifted.energy().iter().zip(spectrum.energy()) {
                assert_close(*a, *b, 1e-6);
            }
            assert_eq!(shifted.intensity(), spectrum.intensity());
        }
    }

    #[test]
    fn test_shift_moves_reference_feature() {
        let analyzer = si(4, 4, 4);
        let geometry = SpectrometerGeometry::default();
        let spectrum = Spectrum::new(vec![8320.0, 8333.0, 8345.0], vec![1.0, 5.0, 2.0]).unwrap();

        let shifted = shift_spectrum(&spectrum, 8333.0, 2.5, &analyzer, &geometry).unwrap();
        assert_close(shifted.energy()[1], 8335.5, 1e-6);
        // 非线性：其余点的位移与 2.5 eV 接近但不相等
        let d0 = shifted.energy()[0] - 8320.0;
        let d2 = shifted.energy()[2] - 8345.0;
        assert!(d0 > 2.0 && d0 < 3.0);
        assert!(d2 > 2.0 && d2 < 3.0);
        assert!((d0 - d2).abs() > 1e-6);
    }

    #[test]
    fn test_shift_preserves_monotonicity() {
        let analyzer = si(4, 4, 4);
        let geometry = SpectrometerGeometry::default();
        let energy = energy_grid(8250.0, 8450.0, 401);
        let spectrum = Spectrum::new(energy, vec![1.0; 401]).unwrap();

        for shift in [-7.0, -0.3, 1.2, 15.0] {
            let shifted = shift_spectrum(&spectrum, 8333.0, shift, &analyzer, &geometry).unwrap();
            assert!(shifted.energy().windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn test_shift_aborts_on_invalid_point() {
        let analyzer = si(1, 1, 1);
        let geometry = SpectrometerGeometry::default();
        let spectrum = Spectrum::new(vec![8333.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert!(matches!(
            shift_spectrum(&spectrum, 8333.0, 1.0, &analyzer, &geometry),
            Err(XesError::Domain { .. })
        ));
    }
}
