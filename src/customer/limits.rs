//! Maximum lengths, in characters, of the stored text fields. The customers table is created
//! with these widths and request validation rejects anything longer.

pub const FIRSTNAME: usize = 63;
pub const LASTNAME: usize = 63;
pub const EMAIL: usize = 120;
pub const PHONE: usize = 60;
pub const STREET_LINE: usize = 256;
pub const CITY: usize = 64;
pub const STATE: usize = 64;
pub const COUNTRY: usize = 63;
pub const ZIPCODE: usize = 60;
