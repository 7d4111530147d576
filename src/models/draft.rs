use serde::{Deserialize, Deserializer, Serialize};

/// A form field, in the order the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    Mobile,
    Company,
    Role,
    Address,
    City,
    State,
    PinCode,
    Date,
    Remarks,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::FullName,
        Field::Email,
        Field::Mobile,
        Field::Company,
        Field::Role,
        Field::Address,
        Field::City,
        Field::State,
        Field::PinCode,
        Field::Date,
        Field::Remarks,
    ];

    /// JSON key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "FullName",
            Field::Email => "Email",
            Field::Mobile => "Mobile",
            Field::Company => "Company",
            Field::Role => "Role",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::PinCode => "PinCode",
            Field::Date => "Date",
            Field::Remarks => "Remarks",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email Address",
            Field::Mobile => "Mobile Number",
            Field::Company => "Company / Institute Name",
            Field::Role => "Department / Role",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::PinCode => "Pin Code",
            Field::Date => "Date of Submission",
            Field::Remarks => "Remarks / Notes",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// The in-progress form record. Every field is a plain string; an empty
/// string means "not filled in".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmissionDraft {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mobile: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pin_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub remarks: String,
}

impl SubmissionDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::Company => &self.company,
            Field::Role => &self.role,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::PinCode => &self.pin_code,
            Field::Date => &self.date,
            Field::Remarks => &self.remarks,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Mobile => &mut self.mobile,
            Field::Company => &mut self.company,
            Field::Role => &mut self.role,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::PinCode => &mut self.pin_code,
            Field::Date => &mut self.date,
            Field::Remarks => &mut self.remarks,
        };
        *slot = value.into();
    }

    /// Builder-style setter.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// True when every field has a non-blank value.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| !self.get(*f).trim().is_empty())
    }

    /// Fill `Date` with today's local date when left blank.
    pub fn fill_date_if_blank(&mut self) {
        if self.date.trim().is_empty() {
            self.date = chrono::Local::now().format("%Y-%m-%d").to_string();
        }
    }
}

/// Backends may send `null` for optional fields; treat it as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// States and union territories accepted by the `State` field.
pub const STATES: [&str; 36] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Case-insensitive lookup of the canonical state name.
pub fn normalize_state(input: &str) -> Option<&'static str> {
    let input = input.trim();
    STATES
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(input))
}
