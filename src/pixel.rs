use std::fmt::Debug;

use gdal::raster::GdalType;

/// A raster sample type the merge can accumulate.
///
/// Nodata values come out of GDAL as `f64` and have to be narrowed to the
/// band type before they can be compared against pixels.
pub trait Pixel: GdalType + Copy + PartialEq + Default + Debug {
    /// Narrow a nodata value, `None` if the band type cannot hold it exactly
    fn from_nodata(value: f64) -> Option<Self>;

    /// Equality against the nodata sentinel (NaN matches NaN)
    fn is_nodata(self, nodata: Self) -> bool {
        self == nodata
    }
}

macro_rules! impl_integer_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                fn from_nodata(value: f64) -> Option<Self> {
                    let (min, max) = (<$t>::MIN as f64, <$t>::MAX as f64);
                    if value.fract() != 0.0 || value < min || value > max {
                        return None;
                    }
                    Some(value as $t)
                }
            }
        )*
    };
}

macro_rules! impl_float_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                fn from_nodata(value: f64) -> Option<Self> {
                    let narrowed = value as $t;
                    if value.is_finite() && narrowed.is_infinite() {
                        return None;
                    }
                    Some(narrowed)
                }

                fn is_nodata(self, nodata: Self) -> bool {
                    self == nodata || (self.is_nan() && nodata.is_nan())
                }
            }
        )*
    };
}

impl_integer_pixel!(u8, u16, i16, u32, i32);
impl_float_pixel!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_nodata_in_range() {
        assert_eq!(u8::from_nodata(0.0), Some(0));
        assert_eq!(u8::from_nodata(255.0), Some(255));
        assert_eq!(i16::from_nodata(-9999.0), Some(-9999));
        assert_eq!(i32::from_nodata(-2147483648.0), Some(i32::MIN));
    }

    #[test]
    fn test_integer_nodata_out_of_range() {
        assert_eq!(u8::from_nodata(-9999.0), None);
        assert_eq!(u8::from_nodata(256.0), None);
        assert_eq!(u16::from_nodata(1.5), None);
        assert_eq!(i32::from_nodata(f64::NAN), None);
    }

    #[test]
    fn test_float_nodata() {
        assert_eq!(f32::from_nodata(-3.4e38), Some(-3.4e38_f32));
        assert!(f64::from_nodata(f64::NAN).unwrap().is_nan());
    }

    #[test]
    fn test_float_nodata_out_of_range() {
        assert_eq!(f32::from_nodata(1e40), None);
        assert_eq!(f32::from_nodata(-1e40), None);
        assert_eq!(f32::from_nodata(f64::INFINITY), Some(f32::INFINITY));
        assert_eq!(f64::from_nodata(1e300), Some(1e300));
    }

    #[test]
    fn test_nan_matches_nan() {
        assert!(f32::NAN.is_nodata(f32::NAN));
        assert!(!1.0_f32.is_nodata(f32::NAN));
        assert!(0.0_f64.is_nodata(0.0));
        assert!(!5_u8.is_nodata(0));
    }
}
