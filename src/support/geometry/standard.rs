use uom::si::{f64::Length, length::inch};

use crate::support::hx::TubePasses;

use super::{
    CatalogError, CopperType, GeometryCatalog, InchSize, PipeDimensions, PipeKey, PipeSpec,
    Schedule, TubeCountKey, TubeKey, TubeLayout,
};

/// Built-in catalog of standard pipe, tube, and bundle geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardCatalog;

const fn size(whole: u32, numerator: u32, denominator: u32) -> InchSize {
    InchSize::fraction(whole, numerator, denominator)
}

/// Steel pipe: nominal size, OD, schedule 40 ID, schedule 80 ID (inches).
const STEEL: [(InchSize, f64, f64, f64); 10] = [
    (size(0, 1, 2), 0.840, 0.622, 0.546),
    (size(0, 3, 4), 1.050, 0.824, 0.742),
    (size(1, 0, 1), 1.315, 1.049, 0.957),
    (size(1, 1, 4), 1.660, 1.380, 1.278),
    (size(1, 1, 2), 1.900, 1.610, 1.500),
    (size(2, 0, 1), 2.375, 2.067, 1.939),
    (size(2, 1, 2), 2.875, 2.469, 2.323),
    (size(3, 0, 1), 3.500, 3.068, 2.900),
    (size(3, 1, 2), 4.000, 3.548, 3.364),
    (size(4, 0, 1), 4.500, 4.026, 3.826),
];

/// Copper tube: nominal size, OD, type K ID, type L ID, type M ID (inches).
const COPPER: [(InchSize, f64, f64, f64, f64); 10] = [
    (size(0, 1, 2), 0.625, 0.527, 0.545, 0.569),
    (size(0, 3, 4), 0.875, 0.745, 0.785, 0.811),
    (size(1, 0, 1), 1.125, 0.995, 1.025, 1.055),
    (size(1, 1, 4), 1.375, 1.245, 1.265, 1.291),
    (size(1, 1, 2), 1.625, 1.481, 1.505, 1.527),
    (size(2, 0, 1), 2.125, 1.959, 1.985, 2.009),
    (size(2, 1, 2), 2.625, 2.435, 2.465, 2.495),
    (size(3, 0, 1), 3.125, 2.907, 2.945, 2.981),
    (size(3, 1, 2), 3.625, 3.385, 3.425, 3.459),
    (size(4, 0, 1), 4.125, 3.857, 3.905, 3.935),
];

/// Exchanger tube outer diameters carried by the BWG table.
const TUBE_ODS: [InchSize; 5] = [
    size(0, 5, 8),
    size(0, 3, 4),
    size(1, 0, 1),
    size(1, 1, 4),
    size(1, 1, 2),
];

/// BWG gauge and wall thickness (inches).
const BWG_WALLS: [(u8, f64); 5] = [(10, 0.134), (12, 0.109), (14, 0.083), (16, 0.065), (18, 0.049)];

/// Shell inner diameters shared by every bundle table, in hundredths of an inch.
const SHELLS: [InchSize; 8] = [
    InchSize::hundredths(800),
    InchSize::hundredths(1000),
    InchSize::hundredths(1200),
    InchSize::hundredths(1325),
    InchSize::hundredths(1525),
    InchSize::hundredths(1725),
    InchSize::hundredths(1925),
    InchSize::hundredths(2125),
];

/// A bundle table: tube OD, pitch, layout, and counts per shell for 1, 2, 4 passes.
struct Bundle {
    tube_od: InchSize,
    pitch: InchSize,
    layout: TubeLayout,
    counts: [[u32; 3]; 8],
}

const BUNDLES: [Bundle; 4] = [
    Bundle {
        tube_od: size(0, 3, 4),
        pitch: size(1, 0, 1),
        layout: TubeLayout::Square,
        counts: [
            [32, 26, 20],
            [52, 52, 40],
            [81, 76, 68],
            [97, 90, 82],
            [137, 124, 116],
            [177, 166, 158],
            [224, 220, 204],
            [277, 270, 246],
        ],
    },
    Bundle {
        tube_od: size(0, 3, 4),
        pitch: size(0, 15, 16),
        layout: TubeLayout::Triangular,
        counts: [
            [36, 32, 26],
            [62, 56, 47],
            [109, 98, 86],
            [127, 114, 96],
            [170, 160, 140],
            [239, 224, 194],
            [301, 282, 252],
            [361, 342, 314],
        ],
    },
    Bundle {
        tube_od: size(1, 0, 1),
        pitch: size(1, 1, 4),
        layout: TubeLayout::Square,
        counts: [
            [21, 16, 14],
            [32, 32, 26],
            [48, 45, 40],
            [61, 56, 52],
            [81, 76, 68],
            [112, 112, 96],
            [138, 132, 128],
            [177, 166, 158],
        ],
    },
    Bundle {
        tube_od: size(1, 0, 1),
        pitch: size(1, 1, 4),
        layout: TubeLayout::Triangular,
        counts: [
            [21, 16, 16],
            [32, 32, 26],
            [55, 52, 48],
            [68, 66, 58],
            [91, 86, 80],
            [131, 118, 106],
            [163, 152, 140],
            [199, 188, 170],
        ],
    },
];

fn dimensions(od: f64, id: f64) -> PipeDimensions {
    PipeDimensions {
        outer_diameter: Length::new::<inch>(od),
        inner_diameter: Length::new::<inch>(id),
    }
}

impl GeometryCatalog for StandardCatalog {
    fn pipe(&self, key: &PipeKey) -> Result<PipeDimensions, CatalogError> {
        let found = match key.spec {
            PipeSpec::Steel(schedule) => STEEL
                .iter()
                .find(|row| row.0 == key.nominal)
                .map(|&(_, od, id40, id80)| match schedule {
                    Schedule::Sch40 => dimensions(od, id40),
                    Schedule::Sch80 => dimensions(od, id80),
                }),
            PipeSpec::Copper(kind) => COPPER
                .iter()
                .find(|row| row.0 == key.nominal)
                .map(|&(_, od, k, l, m)| match kind {
                    CopperType::K => dimensions(od, k),
                    CopperType::L => dimensions(od, l),
                    CopperType::M => dimensions(od, m),
                }),
        };
        found.ok_or_else(|| CatalogError::not_found("pipe", key))
    }

    fn tube(&self, key: &TubeKey) -> Result<PipeDimensions, CatalogError> {
        let wall = BWG_WALLS
            .iter()
            .find(|&&(bwg, _)| bwg == key.bwg)
            .map(|&(_, wall)| wall);

        match wall {
            Some(wall) if TUBE_ODS.contains(&key.outer_diameter) => {
                let od = key.outer_diameter.inches();
                Ok(dimensions(od, od - 2.0 * wall))
            }
            _ => Err(CatalogError::not_found("tube", key)),
        }
    }

    fn tube_count(&self, key: &TubeCountKey) -> Result<u32, CatalogError> {
        let pass_column = match key.passes {
            TubePasses::One => 0,
            TubePasses::Two => 1,
            TubePasses::Four => 2,
        };

        BUNDLES
            .iter()
            .find(|b| b.tube_od == key.tube_od && b.pitch == key.pitch && b.layout == key.layout)
            .and_then(|bundle| {
                SHELLS
                    .iter()
                    .position(|&shell| shell == key.shell_id)
                    .map(|row| bundle.counts[row][pass_column])
            })
            .ok_or_else(|| CatalogError::not_found("tube count", key))
    }
}
