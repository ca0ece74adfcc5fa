use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::locations::{same_location, LocationSet};
use crate::request::{non_blank, BookingRequest, Passengers};
use crate::rules::{PassengerShape, RuleSet};

static CONTACT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const UNKNOWN_CITY: &str = "Please select a city from the list";
const INFANTS_EXCEED_ADULTS: &str = "Infants cannot exceed adults";
const BREAKDOWN_EXPECTED: &str = "Please enter adults, children and infants";
const TOTAL_EXPECTED: &str = "Please enter a single passenger count";

/// Form inputs an error can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    TripType,
    Origin,
    Destination,
    DepartureDate,
    ReturnDate,
    Passengers,
    Adults,
    Children,
    Infants,
    ContactNumber,
    VehicleClass,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::TripType => "tripType",
            Field::Origin => "origin",
            Field::Destination => "destination",
            Field::DepartureDate => "departureDate",
            Field::ReturnDate => "returnDate",
            Field::Passengers => "passengers",
            Field::Adults => "adults",
            Field::Children => "children",
            Field::Infants => "infants",
            Field::ContactNumber => "contactNumber",
            Field::VehicleClass => "vehicleClass",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages. An absent field is valid; an empty mapping means
/// the whole request is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. The first problem found for a field is the one reported.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field, e.g. once the user edits that input
    pub fn clear(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates booking requests against one product's rule set.
///
/// Every rule runs on every call; nothing short-circuits, so the caller gets
/// all problems in one pass. Pure: the current date is an argument.
pub struct BookingValidator {
    rules: RuleSet,
    locations: LocationSet,
}

impl BookingValidator {
    pub fn new(rules: RuleSet, locations: LocationSet) -> Self {
        Self { rules, locations }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn validate(&self, request: &BookingRequest, today: NaiveDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        self.check_trip_type(request, &mut errors);
        self.check_route(request, &mut errors);
        self.check_dates(request, today, &mut errors);
        self.check_passengers(request, &mut errors);
        self.check_contact(request, &mut errors);
        self.check_vehicle(request, &mut errors);

        errors
    }

    fn check_trip_type(&self, request: &BookingRequest, errors: &mut ValidationErrors) {
        match request.trip_type {
            None if self.rules.require_trip_type => {
                errors.add(Field::TripType, &self.rules.messages.trip_type_required);
            }
            Some(trip) if !self.rules.allowed_trip_types.contains(&trip) => {
                errors.add(
                    Field::TripType,
                    format!("{} trips are not offered for {} bookings", trip, self.rules.product),
                );
            }
            _ => {}
        }
    }

    fn check_route(&self, request: &BookingRequest, errors: &mut ValidationErrors) {
        let messages = &self.rules.messages;
        let origin = if self.rules.require_origin { non_blank(&request.origin) } else { None };
        let destination = non_blank(&request.destination);

        if self.rules.require_origin && origin.is_none() {
            errors.add(Field::Origin, &messages.origin_required);
        }
        if destination.is_none() {
            errors.add(Field::Destination, &messages.destination_required);
        }

        if let (Some(from), Some(to)) = (origin, destination) {
            if same_location(from, to) {
                errors.add(Field::Destination, &messages.same_location);
            }
        }

        if self.rules.restrict_to_locations && !self.locations.is_empty() {
            for (field, value) in [(Field::Origin, origin), (Field::Destination, destination)] {
                if let Some(name) = value {
                    if !self.locations.contains(name) {
                        errors.add(field, UNKNOWN_CITY);
                    }
                }
            }
        }
    }

    fn check_dates(
        &self,
        request: &BookingRequest,
        today: NaiveDate,
        errors: &mut ValidationErrors,
    ) {
        let messages = &self.rules.messages;

        match request.departure_date {
            None => errors.add(Field::DepartureDate, &messages.departure_required),
            Some(departure) if departure < today => {
                errors.add(Field::DepartureDate, &messages.departure_in_past);
            }
            Some(_) => {}
        }

        if !self.rules.needs_return_leg(request.trip_type) {
            return;
        }
        match (request.return_date, request.departure_date) {
            (None, _) => errors.add(Field::ReturnDate, &messages.return_required),
            (Some(back), Some(out)) if back <= out => {
                errors.add(Field::ReturnDate, &messages.return_not_after_departure);
            }
            _ => {}
        }
    }

    fn check_passengers(&self, request: &BookingRequest, errors: &mut ValidationErrors) {
        let messages = &self.rules.messages;

        match (self.rules.passenger_shape, request.passengers) {
            (_, None) => errors.add(Field::Passengers, &messages.passengers_required),
            (PassengerShape::Breakdown, Some(Passengers::Breakdown(count))) => {
                let mut negative = false;
                for (field, value) in [
                    (Field::Adults, count.adults),
                    (Field::Children, count.children),
                    (Field::Infants, count.infants),
                ] {
                    if value < 0 {
                        negative = true;
                        errors.add(field, format!("{} cannot be negative", field));
                    }
                }
                if negative {
                    return;
                }
                if count.total() < 1 {
                    errors.add(Field::Passengers, &messages.passengers_minimum);
                }
                if count.infants > count.adults {
                    errors.add(Field::Infants, INFANTS_EXCEED_ADULTS);
                }
            }
            (PassengerShape::Total, Some(Passengers::Total(n))) => {
                if n < 1 {
                    errors.add(Field::Passengers, &messages.passengers_minimum);
                }
            }
            (PassengerShape::Breakdown, Some(Passengers::Total(_))) => {
                errors.add(Field::Passengers, BREAKDOWN_EXPECTED);
            }
            (PassengerShape::Total, Some(Passengers::Breakdown(_))) => {
                errors.add(Field::Passengers, TOTAL_EXPECTED);
            }
        }
    }

    fn check_contact(&self, request: &BookingRequest, errors: &mut ValidationErrors) {
        let messages = &self.rules.messages;

        match request.contact_number.as_ref().map(|c| c.expose().as_str()) {
            None => errors.add(Field::ContactNumber, &messages.contact_required),
            Some(raw) if raw.trim().is_empty() => {
                errors.add(Field::ContactNumber, &messages.contact_required);
            }
            Some(raw) if !CONTACT_NUMBER_RE.is_match(raw) => {
                errors.add(Field::ContactNumber, &messages.contact_invalid);
            }
            Some(_) => {}
        }
    }

    fn check_vehicle(&self, request: &BookingRequest, errors: &mut ValidationErrors) {
        if self.rules.require_vehicle_class && request.vehicle_class.is_none() {
            errors.add(Field::VehicleClass, &self.rules.messages.vehicle_class_required);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PassengerCount;
    use chrono::Days;
    use wayfare_shared::{Masked, Product, TripType, VehicleClass};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn cities() -> LocationSet {
        LocationSet::new(["Delhi", "Mumbai", "Goa", "Jaipur"])
    }

    fn flight_validator() -> BookingValidator {
        BookingValidator::new(RuleSet::flight(), cities())
    }

    fn valid_flight() -> BookingRequest {
        let mut request = BookingRequest::new(Product::Flight);
        request.trip_type = Some(TripType::RoundTrip);
        request.origin = Some("Delhi".to_string());
        request.destination = Some("Mumbai".to_string());
        request.departure_date = Some(today() + Days::new(7));
        request.return_date = Some(today() + Days::new(10));
        request.passengers = Some(Passengers::Breakdown(PassengerCount::new(2, 1, 1)));
        request.contact_number = Some(Masked::from("9876543210"));
        request
    }

    fn valid_taxi() -> BookingRequest {
        let mut request = BookingRequest::new(Product::Taxi);
        request.trip_type = Some(TripType::OneWay);
        request.origin = Some("Connaught Place".to_string());
        request.destination = Some("IGI Airport".to_string());
        request.departure_date = Some(today());
        request.passengers = Some(Passengers::Total(2));
        request.contact_number = Some(Masked::from("9876543210"));
        request.vehicle_class = Some(VehicleClass::Sedan);
        request
    }

    #[test]
    fn test_valid_requests_have_no_errors() {
        assert!(flight_validator().validate(&valid_flight(), today()).is_valid());

        let taxi = BookingValidator::new(RuleSet::taxi(), LocationSet::default());
        assert!(taxi.validate(&valid_taxi(), today()).is_valid());
    }

    #[test]
    fn test_empty_request_reports_every_field() {
        let errors = flight_validator().validate(&BookingRequest::new(Product::Flight), today());

        assert_eq!(errors.get(Field::Origin), Some("Please select departure city"));
        assert_eq!(errors.get(Field::Destination), Some("Please select arrival city"));
        assert!(errors.contains(Field::TripType));
        assert!(errors.contains(Field::DepartureDate));
        assert!(errors.contains(Field::Passengers));
        assert!(errors.contains(Field::ContactNumber));
        // No trip type, so no return leg can be demanded yet
        assert!(!errors.contains(Field::ReturnDate));
    }

    #[test]
    fn test_blank_locations_count_as_missing() {
        let mut request = valid_flight();
        request.origin = Some("   ".to_string());
        let errors = flight_validator().validate(&request, today());
        assert_eq!(errors.get(Field::Origin), Some("Please select departure city"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_same_origin_and_destination() {
        let mut request = valid_flight();
        request.destination = Some("delhi".to_string());
        let errors = flight_validator().validate(&request, today());

        assert_eq!(
            errors.get(Field::Destination),
            Some("Origin and destination cannot be the same")
        );

        let taxi = BookingValidator::new(RuleSet::taxi(), LocationSet::default());
        let mut request = valid_taxi();
        request.destination = Some("connaught place".to_string());
        let errors = taxi.validate(&request, today());
        assert_eq!(
            errors.get(Field::Destination),
            Some("Pickup and drop locations cannot be the same")
        );
        assert!(!errors.contains(Field::Origin));
    }

    #[test]
    fn test_unknown_city_when_restricted() {
        let mut request = valid_flight();
        request.destination = Some("Atlantis".to_string());
        let errors = flight_validator().validate(&request, today());
        assert_eq!(errors.get(Field::Destination), Some(UNKNOWN_CITY));

        // Taxi addresses are free text
        let taxi = BookingValidator::new(RuleSet::taxi(), cities());
        assert!(taxi.validate(&valid_taxi(), today()).is_valid());
    }

    #[test]
    fn test_departure_date_boundary() {
        let validator = flight_validator();
        let mut request = valid_flight();

        request.departure_date = Some(today());
        assert!(!validator.validate(&request, today()).contains(Field::DepartureDate));

        request.departure_date = Some(today() - Days::new(1));
        let errors = validator.validate(&request, today());
        assert_eq!(errors.get(Field::DepartureDate), Some("Departure date cannot be in the past"));
    }

    #[test]
    fn test_return_date_must_follow_departure() {
        let validator = flight_validator();
        let departure = today() + Days::new(5);

        for offset in 0..10u64 {
            let mut request = valid_flight();
            request.departure_date = Some(departure);
            request.return_date = Some(departure - Days::new(5) + Days::new(offset));
            let errors = validator.validate(&request, today());
            assert_eq!(errors.contains(Field::ReturnDate), offset <= 5, "offset {}", offset);
        }
    }

    #[test]
    fn test_return_date_only_for_round_trips() {
        let validator = flight_validator();
        let mut request = valid_flight();
        request.trip_type = Some(TripType::OneWay);
        request.return_date = None;
        assert!(validator.validate(&request, today()).is_valid());

        request.trip_type = Some(TripType::RoundTrip);
        let errors = validator.validate(&request, today());
        assert_eq!(errors.get(Field::ReturnDate), Some("Please select return date"));
    }

    #[test]
    fn test_trip_type_must_be_offered() {
        let mut request = valid_flight();
        request.trip_type = Some(TripType::Hourly);
        let errors = flight_validator().validate(&request, today());
        assert_eq!(
            errors.get(Field::TripType),
            Some("hourly trips are not offered for flight bookings")
        );
    }

    #[test]
    fn test_infants_cannot_exceed_adults() {
        let validator = flight_validator();
        for adults in 0..4 {
            for infants in 0..4 {
                let mut request = valid_flight();
                let count = PassengerCount::new(adults, 1, infants);
                request.passengers = Some(Passengers::Breakdown(count));
                let errors = validator.validate(&request, today());
                assert_eq!(errors.contains(Field::Infants), infants > adults);
            }
        }
    }

    #[test]
    fn test_passenger_minimum() {
        let mut request = valid_flight();
        request.passengers = Some(Passengers::Breakdown(PassengerCount::default()));
        let errors = flight_validator().validate(&request, today());
        assert_eq!(errors.get(Field::Passengers), Some("At least one passenger required"));
        assert!(!errors.contains(Field::Infants));

        let taxi = BookingValidator::new(RuleSet::taxi(), LocationSet::default());
        let mut request = valid_taxi();
        request.passengers = Some(Passengers::Total(0));
        assert!(taxi.validate(&request, today()).contains(Field::Passengers));
    }

    #[test]
    fn test_huge_counts_are_reported_not_overflowed() {
        let validator = flight_validator();

        let mut request = valid_flight();
        request.passengers = Some(Passengers::Breakdown(PassengerCount::new(i32::MAX, 1, 0)));
        assert!(validator.validate(&request, today()).is_valid());

        let count = PassengerCount::new(1, i32::MAX, i32::MAX);
        request.passengers = Some(Passengers::Breakdown(count));
        let errors = validator.validate(&request, today());
        assert_eq!(errors.get(Field::Infants), Some(INFANTS_EXCEED_ADULTS));
        assert!(!errors.contains(Field::Passengers));
    }

    #[test]
    fn test_negative_counts_are_field_errors() {
        let mut request = valid_flight();
        request.passengers = Some(Passengers::Breakdown(PassengerCount::new(2, -1, 0)));
        let errors = flight_validator().validate(&request, today());
        assert_eq!(errors.get(Field::Children), Some("children cannot be negative"));
        assert!(!errors.contains(Field::Passengers));
    }

    #[test]
    fn test_passenger_shape_mismatch() {
        let mut request = valid_flight();
        request.passengers = Some(Passengers::Total(2));
        let errors = flight_validator().validate(&request, today());
        assert_eq!(errors.get(Field::Passengers), Some(BREAKDOWN_EXPECTED));
    }

    #[test]
    fn test_contact_number_shapes() {
        let validator = flight_validator();
        let accepted = ["9876543210", "0000000000"];
        let rejected = [
            "987654321",
            "98765432101",
            "98765abcde",
            "+919876543",
            "98765 43210",
            "98765-4321",
            "９８７６５４３２１０",
        ];

        for number in accepted {
            let mut request = valid_flight();
            request.contact_number = Some(Masked::from(number));
            let errors = validator.validate(&request, today());
            assert!(!errors.contains(Field::ContactNumber), "{}", number);
        }
        for number in rejected {
            let mut request = valid_flight();
            request.contact_number = Some(Masked::from(number));
            let errors = validator.validate(&request, today());
            assert_eq!(
                errors.get(Field::ContactNumber),
                Some("Please enter a valid 10-digit contact number"),
                "{}",
                number
            );
        }
    }

    #[test]
    fn test_taxi_requires_vehicle_class() {
        let taxi = BookingValidator::new(RuleSet::taxi(), LocationSet::default());
        let mut request = valid_taxi();
        request.vehicle_class = None;
        let errors = taxi.validate(&request, today());
        assert_eq!(errors.get(Field::VehicleClass), Some("Please select a vehicle"));
    }

    #[test]
    fn test_hotel_stay_dates() {
        let hotel = BookingValidator::new(RuleSet::hotel(), cities());
        let mut request = BookingRequest::new(Product::Hotel);
        request.origin = Some("Goa".to_string());
        request.destination = Some("Goa".to_string());
        request.departure_date = Some(today() + Days::new(3));
        request.return_date = Some(today() + Days::new(3));
        request.passengers = Some(Passengers::Total(2));
        request.contact_number = Some(Masked::from("9876543210"));

        let errors = hotel.validate(&request, today());
        // Origin is not part of a hotel booking, so it cannot clash with the city
        assert!(!errors.contains(Field::Destination));
        assert_eq!(
            errors.get(Field::ReturnDate),
            Some("Check-out date must be after check-in date")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_errors_serialize_by_field_name() {
        let mut request = valid_flight();
        request.contact_number = None;
        let errors = flight_validator().validate(&request, today());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["contactNumber"], "Please enter contact number");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_single_field() {
        let empty = BookingRequest::new(Product::Flight);
        let mut errors = flight_validator().validate(&empty, today());
        let before = errors.len();
        assert!(errors.clear(Field::Origin).is_some());
        assert_eq!(errors.len(), before - 1);
        assert!(errors.clear(Field::Origin).is_none());
    }
}
