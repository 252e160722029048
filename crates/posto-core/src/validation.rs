//! Ufo field validation

use crate::error::BusinessError;
use posto_types::TankSize;

/// Check a proposed ufo and return its tank size.
///
/// Rules are checked in order and the first violation is returned. Inputs
/// are taken verbatim: no trimming or case folding happens here.
pub fn validate(
    model: &str,
    licence: &str,
    plate: &str,
    tank: i64,
    fuel: &str,
) -> Result<TankSize, BusinessError> {
    let tank = TankSize::try_from(tank)?;
    if model.is_empty() {
        return Err(BusinessError::MissingModel);
    }
    if plate.is_empty() || licence.is_empty() {
        return Err(BusinessError::MissingPlateOrLicence);
    }
    if fuel.is_empty() {
        return Err(BusinessError::MissingFuel);
    }
    Ok(tank)
}
