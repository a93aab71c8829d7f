//! Validation rules for project and plot input.

use crate::matrix::PhysiognomicMatrix;
use crate::plot::Coordinates;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("project name is required")]
    ProjectNameRequired,

    #[error("latitude must be between -90 and 90 degrees (got {0})")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be between -180 and 180 degrees (got {0})")]
    LongitudeOutOfRange(f64),

    #[error("altitude must be zero or greater (got {0})")]
    NegativeAltitude(f64),

    #[error("the physiognomic matrix needs at least one filled cell")]
    EmptyMatrix,
}

/// Validates a project name, returning it trimmed.
pub fn validate_project_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::ProjectNameRequired);
    }
    Ok(trimmed)
}

/// Checks latitude, longitude and altitude ranges. NaN is out of range.
pub fn validate_coordinates(coords: &Coordinates) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&coords.latitude) {
        return Err(ValidationError::LatitudeOutOfRange(coords.latitude));
    }
    if !(-180.0..=180.0).contains(&coords.longitude) {
        return Err(ValidationError::LongitudeOutOfRange(coords.longitude));
    }
    if coords.altitude.is_nan() || coords.altitude < 0.0 {
        return Err(ValidationError::NegativeAltitude(coords.altitude));
    }
    Ok(())
}

/// Validates everything a new plot needs before it is recorded.
///
/// A matrix holding only leaf-row cells is accepted; it yields an empty
/// formula.
pub fn validate_plot(
    coords: &Coordinates,
    matrix: &PhysiognomicMatrix,
) -> Result<(), ValidationError> {
    validate_coordinates(coords)?;
    if matrix.is_empty() {
        return Err(ValidationError::EmptyMatrix);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(latitude: f64, longitude: f64, altitude: f64) -> Coordinates {
        Coordinates { latitude, longitude, altitude }
    }

    #[test]
    fn project_name_is_trimmed() {
        assert_eq!(validate_project_name("  Serra  "), Ok("Serra"));
        assert_eq!(validate_project_name("   "), Err(ValidationError::ProjectNameRequired));
    }

    #[test]
    fn coordinate_bounds_are_inclusive() {
        assert!(validate_coordinates(&coords(90.0, -180.0, 0.0)).is_ok());
        assert!(validate_coordinates(&coords(-90.0, 180.0, 8848.0)).is_ok());
    }

    #[test]
    fn coordinate_violations() {
        assert_eq!(
            validate_coordinates(&coords(90.5, 0.0, 0.0)),
            Err(ValidationError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            validate_coordinates(&coords(0.0, -181.0, 0.0)),
            Err(ValidationError::LongitudeOutOfRange(-181.0))
        );
        assert_eq!(
            validate_coordinates(&coords(0.0, 0.0, -1.0)),
            Err(ValidationError::NegativeAltitude(-1.0))
        );
        assert!(validate_coordinates(&coords(f64::NAN, 0.0, 0.0)).is_err());
        assert!(validate_coordinates(&coords(0.0, 0.0, f64::NAN)).is_err());
    }

    #[test]
    fn plot_requires_a_filled_matrix() {
        let c = coords(-15.0, -47.0, 1000.0);
        assert_eq!(
            validate_plot(&c, &PhysiognomicMatrix::new()),
            Err(ValidationError::EmptyMatrix)
        );
        let leaf_only = PhysiognomicMatrix::from_pairs([("F3", "w")]).unwrap();
        assert!(validate_plot(&c, &leaf_only).is_ok());
    }
}
