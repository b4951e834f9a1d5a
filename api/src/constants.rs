/// Field manager recorded on status writes made by the doctor tool.
pub const FIELD_MANAGER: &str = "hwameidoc";
