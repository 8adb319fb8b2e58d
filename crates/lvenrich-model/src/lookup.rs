/// Column holding the international designator in input files.
pub const DESIGNATOR_FIELD: &str = "intldes";

/// Column added (or overwritten) with the launch vehicle name.
pub const LAUNCH_VEHICLE_FIELD: &str = "launch_vehicle";

/// Written when the designator's year cannot be parsed.
pub const INVALID_SENTINEL: &str = "INVALID";

/// Written when the year's table has no entry for the designator.
pub const NOT_FOUND_SENTINEL: &str = "NOT FOUND";

/// Result of looking up one record's launch vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleLookup {
    /// No designator on the row; nothing was looked up.
    Blank,
    /// The designator's year could not be parsed.
    Invalid,
    /// The year's table maps the designator to this vehicle.
    Found(String),
    /// The year's table (possibly empty after a failed fetch) lacks the designator.
    NotFound,
}

impl VehicleLookup {
    /// The value written into the launch vehicle column.
    pub fn field_value(&self) -> &str {
        match self {
            VehicleLookup::Blank => "",
            VehicleLookup::Invalid => INVALID_SENTINEL,
            VehicleLookup::Found(name) => name,
            VehicleLookup::NotFound => NOT_FOUND_SENTINEL,
        }
    }
}
