//! Doctor domain entity and related types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::validation::{self, DoctorField, ValidationError};

/// Fields that define the identity of a record for equality and hashing.
type IdentityKey<'a> = (Option<i64>, &'a str, &'a str, &'a str, &'a str, &'a [String]);

/// Doctor domain entity.
///
/// A record is transient until the storage layer assigns its id, and
/// persisted afterwards. Every constructor and setter validates its input,
/// so a `DoctorRecord` never holds a value that breaks a field rule.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    id: Option<i64>,
    name: String,
    specialty: String,
    email: String,
    #[serde(skip_serializing)]
    password: String,
    phone: String,
    available_times: Vec<String>,
    years_of_experience: Option<i64>,
    clinic_address: Option<String>,
    rating: Option<i64>,
}

impl DoctorRecord {
    /// Create a new, not yet persisted record.
    ///
    /// # Errors
    /// Returns a validation error naming the first field that is missing or
    /// breaks its rule.
    pub fn new(fields: NewDoctor) -> DomainResult<Self> {
        Self::build(None, fields)
    }

    /// Rebuild a record loaded from storage under its assigned id.
    pub fn restore(id: i64, fields: NewDoctor) -> DomainResult<Self> {
        Self::build(Some(id), fields)
    }

    fn build(id: Option<i64>, fields: NewDoctor) -> DomainResult<Self> {
        let name = validation::required(DoctorField::Name, fields.name)?;
        validation::check_name(&name)?;
        let specialty = validation::required(DoctorField::Specialty, fields.specialty)?;
        validation::check_specialty(&specialty)?;
        let email = validation::required(DoctorField::Email, fields.email)?;
        validation::check_email(&email)?;
        let password = validation::required(DoctorField::Password, fields.password)?;
        validation::check_password(&password)?;
        let phone = validation::required(DoctorField::Phone, fields.phone)?;
        validation::check_phone(&phone)?;
        validation::check_years_of_experience(fields.years_of_experience)?;
        validation::check_rating(fields.rating)?;

        Ok(Self {
            id,
            name,
            specialty,
            email,
            password,
            phone,
            available_times: fields.available_times,
            years_of_experience: fields.years_of_experience,
            clinic_address: fields.clinic_address,
            rating: fields.rating,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored credential. Never part of any outward representation.
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Time slot tokens in insertion order
    pub fn available_times(&self) -> &[String] {
        &self.available_times
    }

    pub fn years_of_experience(&self) -> Option<i64> {
        self.years_of_experience
    }

    pub fn clinic_address(&self) -> Option<&str> {
        self.clinic_address.as_deref()
    }

    pub fn rating(&self) -> Option<i64> {
        self.rating
    }

    /// Check if the storage layer has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Record the id generated by the storage layer.
    ///
    /// # Errors
    /// An id can only be assigned once.
    pub fn assign_id(&mut self, id: i64) -> DomainResult<()> {
        if let Some(current) = self.id {
            return Err(ValidationError::id_already_assigned(current).into());
        }
        self.id = Some(id);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        validation::check_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_specialty(&mut self, specialty: impl Into<String>) -> DomainResult<()> {
        let specialty = specialty.into();
        validation::check_specialty(&specialty)?;
        self.specialty = specialty;
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> DomainResult<()> {
        let email = email.into();
        validation::check_email(&email)?;
        self.email = email;
        Ok(())
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> DomainResult<()> {
        let password = password.into();
        validation::check_password(&password)?;
        self.password = password;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> DomainResult<()> {
        let phone = phone.into();
        validation::check_phone(&phone)?;
        self.phone = phone;
        Ok(())
    }

    /// Replace all time slots. Order is kept and duplicates are allowed.
    pub fn set_available_times(&mut self, times: Vec<String>) {
        self.available_times = times;
    }

    /// Append a time slot after the existing ones.
    pub fn add_available_time(&mut self, time: impl Into<String>) {
        self.available_times.push(time.into());
    }

    pub fn set_years_of_experience(&mut self, years: Option<i64>) -> DomainResult<()> {
        validation::check_years_of_experience(years)?;
        self.years_of_experience = years;
        Ok(())
    }

    pub fn set_clinic_address(&mut self, address: Option<String>) {
        self.clinic_address = address;
    }

    pub fn set_rating(&mut self, rating: Option<i64>) -> DomainResult<()> {
        validation::check_rating(rating)?;
        self.rating = rating;
        Ok(())
    }

    /// Apply a partial update.
    ///
    /// Either every present field is written or, when any of them is
    /// invalid, none is.
    pub fn apply(&mut self, update: UpdateDoctor) -> DomainResult<()> {
        if let Some(err) = validation::update_failures(&update).into_iter().next() {
            return Err(err.into());
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(specialty) = update.specialty {
            self.specialty = specialty;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(times) = update.available_times {
            self.available_times = times;
        }
        if update.years_of_experience.is_some() {
            self.years_of_experience = update.years_of_experience;
        }
        if update.clinic_address.is_some() {
            self.clinic_address = update.clinic_address;
        }
        if update.rating.is_some() {
            self.rating = update.rating;
        }
        Ok(())
    }

    /// Break the record back into its construction fields.
    pub fn into_fields(self) -> (Option<i64>, NewDoctor) {
        let fields = NewDoctor {
            name: Some(self.name),
            specialty: Some(self.specialty),
            email: Some(self.email),
            password: Some(self.password),
            phone: Some(self.phone),
            available_times: self.available_times,
            years_of_experience: self.years_of_experience,
            clinic_address: self.clinic_address,
            rating: self.rating,
        };
        (self.id, fields)
    }

    fn identity_key(&self) -> IdentityKey<'_> {
        (
            self.id,
            &self.name,
            &self.specialty,
            &self.email,
            &self.phone,
            &self.available_times,
        )
    }
}

/// A record without an id only equals the same instance.
impl PartialEq for DoctorRecord {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.id.is_some() && self.identity_key() == other.identity_key())
    }
}

impl Eq for DoctorRecord {}

impl Hash for DoctorRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl fmt::Display for DoctorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Doctor {{ id: ")?;
        match self.id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "unassigned")?,
        }
        write!(
            f,
            ", name: {:?}, specialty: {:?}, email: {:?}, phone: {:?}, available_times: {:?} }}",
            self.name, self.specialty, self.email, self.phone, self.available_times
        )
    }
}

// Don't expose the credential in debug output (security)
impl fmt::Debug for DoctorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoctorRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("specialty", &self.specialty)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("available_times", &self.available_times)
            .field("years_of_experience", &self.years_of_experience)
            .field("clinic_address", &self.clinic_address)
            .field("rating", &self.rating)
            .finish()
    }
}

/// Doctor registration data transfer object.
///
/// Required fields are optional here so a missing value is reported by
/// validation rather than rejected by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    /// Full name (3-100 characters)
    pub name: Option<String>,
    /// Medical specialty (3-50 characters)
    pub specialty: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// Login password (minimum 6 characters)
    pub password: Option<String>,
    /// Phone number (10-15 characters)
    pub phone: Option<String>,
    /// Time slots such as "09:00-10:00"
    #[serde(default)]
    pub available_times: Vec<String>,
    /// Years of practice (0-50)
    pub years_of_experience: Option<i64>,
    /// Clinic address
    pub clinic_address: Option<String>,
    /// Rating (1-5)
    pub rating: Option<i64>,
}

/// Doctor profile update data transfer object. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    /// Replaces the whole list when present
    pub available_times: Option<Vec<String>>,
    pub years_of_experience: Option<i64>,
    pub clinic_address: Option<String>,
    pub rating: Option<i64>,
}

/// Doctor response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    /// Identifier assigned on first persistence
    pub id: Option<i64>,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    pub available_times: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

impl From<DoctorRecord> for DoctorResponse {
    fn from(doctor: DoctorRecord) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            specialty: doctor.specialty,
            email: doctor.email,
            phone: doctor.phone,
            available_times: doctor.available_times,
            years_of_experience: doctor.years_of_experience,
            clinic_address: doctor.clinic_address,
            rating: doctor.rating,
        }
    }
}

impl From<&DoctorRecord> for DoctorResponse {
    fn from(doctor: &DoctorRecord) -> Self {
        Self::from(doctor.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    use super::*;
    use crate::DomainError;

    fn valid_fields() -> NewDoctor {
        NewDoctor {
            name: Some("Gregory House".to_string()),
            specialty: Some("Diagnostics".to_string()),
            email: Some("house@ppth.org".to_string()),
            password: Some("secret123".to_string()),
            phone: Some("5550100123".to_string()),
            available_times: vec!["09:00-10:00".to_string(), "10:00-11:00".to_string()],
            years_of_experience: Some(20),
            clinic_address: Some("Princeton-Plainsboro".to_string()),
            rating: Some(4),
        }
    }

    fn persisted(id: i64) -> DoctorRecord {
        DoctorRecord::restore(id, valid_fields()).unwrap()
    }

    fn hash_of(doctor: &DoctorRecord) -> u64 {
        let mut hasher = DefaultHasher::new();
        doctor.hash(&mut hasher);
        hasher.finish()
    }

    fn rejected_field(fields: NewDoctor) -> DoctorField {
        match DoctorRecord::new(fields) {
            Err(DomainError::Validation(err)) => err.field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_doctor_keeps_every_value() {
        let doctor = DoctorRecord::new(valid_fields()).unwrap();

        assert_eq!(doctor.id(), None);
        assert!(!doctor.is_persisted());
        assert_eq!(doctor.name(), "Gregory House");
        assert_eq!(doctor.specialty(), "Diagnostics");
        assert_eq!(doctor.email(), "house@ppth.org");
        assert_eq!(doctor.password(), "secret123");
        assert_eq!(doctor.phone(), "5550100123");
        assert_eq!(doctor.available_times(), ["09:00-10:00", "10:00-11:00"]);
        assert_eq!(doctor.years_of_experience(), Some(20));
        assert_eq!(doctor.clinic_address(), Some("Princeton-Plainsboro"));
        assert_eq!(doctor.rating(), Some(4));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let fields = NewDoctor {
            available_times: Vec::new(),
            years_of_experience: None,
            clinic_address: None,
            rating: None,
            ..valid_fields()
        };

        let doctor = DoctorRecord::new(fields).unwrap();
        assert!(doctor.available_times().is_empty());
        assert_eq!(doctor.years_of_experience(), None);
        assert_eq!(doctor.clinic_address(), None);
        assert_eq!(doctor.rating(), None);
    }

    #[test]
    fn test_short_name_rejected() {
        let fields = NewDoctor {
            name: Some("Jo".to_string()),
            ..valid_fields()
        };
        assert_eq!(rejected_field(fields), DoctorField::Name);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let fields = NewDoctor {
            email: Some("not-an-email".to_string()),
            ..valid_fields()
        };
        assert_eq!(rejected_field(fields), DoctorField::Email);
    }

    #[test]
    fn test_short_phone_rejected() {
        let fields = NewDoctor {
            phone: Some("12345".to_string()),
            ..valid_fields()
        };
        assert_eq!(rejected_field(fields), DoctorField::Phone);
    }

    #[test]
    fn test_experience_upper_bound_inclusive() {
        let too_many = NewDoctor {
            years_of_experience: Some(75),
            ..valid_fields()
        };
        assert_eq!(rejected_field(too_many), DoctorField::YearsOfExperience);

        let boundary = NewDoctor {
            years_of_experience: Some(50),
            ..valid_fields()
        };
        assert_eq!(
            DoctorRecord::new(boundary).unwrap().years_of_experience(),
            Some(50)
        );
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let fields = NewDoctor {
            rating: Some(0),
            ..valid_fields()
        };
        assert_eq!(rejected_field(fields), DoctorField::Rating);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let fields = NewDoctor {
            password: None,
            ..valid_fields()
        };
        match DoctorRecord::new(fields) {
            Err(DomainError::Validation(err)) => {
                assert_eq!(err.field, DoctorField::Password);
                assert_eq!(err.code, "required");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_available_times_order_preserved() {
        let mut doctor = DoctorRecord::new(valid_fields()).unwrap();
        assert_eq!(doctor.available_times(), ["09:00-10:00", "10:00-11:00"]);

        doctor.add_available_time("08:00-09:00");
        doctor.add_available_time("09:00-10:00");
        assert_eq!(
            doctor.available_times(),
            ["09:00-10:00", "10:00-11:00", "08:00-09:00", "09:00-10:00"]
        );
    }

    #[test]
    fn test_setter_rejects_invalid_value_and_keeps_old_one() {
        let mut doctor = DoctorRecord::new(valid_fields()).unwrap();

        assert!(doctor.set_name("Jo").is_err());
        assert_eq!(doctor.name(), "Gregory House");

        assert!(doctor.set_email("broken").is_err());
        assert_eq!(doctor.email(), "house@ppth.org");

        assert!(doctor.set_rating(Some(10)).is_err());
        assert_eq!(doctor.rating(), Some(4));

        doctor.set_phone("5550100999").unwrap();
        assert_eq!(doctor.phone(), "5550100999");

        doctor.set_years_of_experience(None).unwrap();
        assert_eq!(doctor.years_of_experience(), None);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut doctor = DoctorRecord::new(valid_fields()).unwrap();

        let bad = UpdateDoctor {
            name: Some("James Wilson".to_string()),
            rating: Some(7),
            ..Default::default()
        };
        assert!(doctor.apply(bad).is_err());
        assert_eq!(doctor.name(), "Gregory House");

        let good = UpdateDoctor {
            name: Some("James Wilson".to_string()),
            available_times: Some(vec!["14:00-15:00".to_string()]),
            ..Default::default()
        };
        doctor.apply(good).unwrap();
        assert_eq!(doctor.name(), "James Wilson");
        assert_eq!(doctor.available_times(), ["14:00-15:00"]);
        assert_eq!(doctor.specialty(), "Diagnostics");
    }

    #[test]
    fn test_id_assigned_once() {
        let mut doctor = DoctorRecord::new(valid_fields()).unwrap();
        doctor.assign_id(7).unwrap();
        assert!(doctor.is_persisted());

        let err = doctor.assign_id(8).unwrap_err();
        assert_eq!(err.as_validation().map(|e| e.field), Some(DoctorField::Id));
        assert_eq!(doctor.id(), Some(7));
    }

    #[test]
    fn test_equality_ignores_non_identity_fields() {
        let a = persisted(1);
        let mut b = persisted(1);
        b.set_password("another-password").unwrap();
        b.set_rating(Some(1)).unwrap();
        b.set_years_of_experience(Some(2)).unwrap();
        b.set_clinic_address(None);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equality_covers_identity_fields() {
        let a = persisted(1);

        assert_ne!(a, persisted(2));

        let mut other = persisted(1);
        other.set_phone("5550100999").unwrap();
        assert_ne!(a, other);

        let mut other = persisted(1);
        other.set_available_times(vec!["10:00-11:00".to_string(), "09:00-10:00".to_string()]);
        assert_ne!(a, other);
    }

    #[test]
    fn test_transient_records_never_equal() {
        let a = DoctorRecord::new(valid_fields()).unwrap();
        let b = DoctorRecord::new(valid_fields()).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, a.clone());
        assert_ne!(a, persisted(1));
    }

    #[test]
    fn test_transient_record_equals_same_instance() {
        let a = DoctorRecord::new(valid_fields()).unwrap();
        let same = &a;
        assert!(a == *same);

        let mut set = HashSet::new();
        set.insert(a);
        let stored = set.iter().next().unwrap();
        assert!(set.contains(stored));
    }

    #[test]
    fn test_rendering_omits_password() {
        let doctor = persisted(3);

        let display = doctor.to_string();
        let debug = format!("{:?}", doctor);
        let json = serde_json::to_string(&doctor).unwrap();

        for rendered in [&display, &debug, &json] {
            assert!(!rendered.contains("secret123"), "leaked in {}", rendered);
        }
        assert!(display.contains("id: 3"));
        assert!(display.contains("Gregory House"));
        assert!(display.contains("09:00-10:00"));
        assert!(json.contains("\"availableTimes\""));
    }

    #[test]
    fn test_transient_rendering_marks_missing_id() {
        let doctor = DoctorRecord::new(valid_fields()).unwrap();
        assert!(doctor.to_string().starts_with("Doctor { id: unassigned"));
    }

    #[test]
    fn test_response_has_no_password() {
        let response = DoctorResponse::from(&persisted(5));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["yearsOfExperience"], 20);
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_new_doctor_deserializes_camel_case() {
        let fields: NewDoctor = serde_json::from_str(
            r#"{"name":"Lisa Cuddy","specialty":"Endocrinology","email":"cuddy@ppth.org",
                "password":"hunter22","phone":"5550100456","yearsOfExperience":15}"#,
        )
        .unwrap();

        assert!(fields.available_times.is_empty());
        let doctor = DoctorRecord::new(fields).unwrap();
        assert_eq!(doctor.years_of_experience(), Some(15));
    }

    #[test]
    fn test_into_fields_round_trips_through_restore() {
        let doctor = persisted(9);
        let (id, fields) = doctor.clone().into_fields();
        let restored = DoctorRecord::restore(id.unwrap(), fields).unwrap();
        assert_eq!(doctor, restored);
    }
}
