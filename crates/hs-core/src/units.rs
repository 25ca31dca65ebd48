// hs-core/src/units.rs

use uom::si::f64::{Energy as UomEnergy, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn cm(v: f64) -> Length {
    use uom::si::length::centimeter;
    Length::new::<centimeter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn watt_hours(v: f64) -> Energy {
    use uom::si::energy::watt_hour;
    Energy::new::<watt_hour>(v)
}

/// Length in meters.
#[inline]
pub fn in_meters(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

/// Energy in kilowatt-hours.
#[inline]
pub fn in_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

pub mod constants {
    /// Density of indoor air used for airflow losses.
    pub const AIR_DENSITY_KG_M3: f64 = 1.2;
    /// Specific heat of air at constant pressure.
    pub const AIR_CP_J_PER_KG_K: f64 = 1005.0;
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    pub const HOURS_PER_DAY: usize = 24;
    pub const HOURS_PER_YEAR: usize = 8760;
    pub const DAYS_PER_YEAR: f64 = 365.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_constructors_agree() {
        assert!((in_meters(mm(380.0)) - 0.38).abs() < 1e-12);
        assert!((in_meters(cm(38.0)) - 0.38).abs() < 1e-12);
        assert!((in_meters(m(0.38)) - 0.38).abs() < 1e-12);
    }

    #[test]
    fn watt_hours_to_kwh() {
        assert!((in_kwh(watt_hours(129_600.0)) - 129.6).abs() < 1e-9);
    }
}
