//! Profile catalog: documented global message numbers, the fields each
//! kind expects, and the enum value sets those fields reference.
//!
//! Hand-materialized in the shape the profile generator emits. Only the
//! kinds and values exercised by common activity files are catalogued;
//! anything else is handled through the undocumented or
//! manufacturer-specific paths.

use std::collections::HashMap;
use std::convert::TryFrom;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::base_types::Value;
use crate::error::FitError;

/// Global message numbers documented by the FIT profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum MesgNum {
    FileId = 0,
    Session = 18,
    Lap = 19,
    Record = 20,
    Event = 21,
    DeviceInfo = 23,
    Activity = 34,
    FileCreator = 49,
    FieldDescription = 206,
    DeveloperDataId = 207,
}

impl MesgNum {
    /// Inclusive range reserved for manufacturer specific messages.
    pub const MFG_RANGE_MIN: u16 = 0xFF00;
    pub const MFG_RANGE_MAX: u16 = 0xFFFE;

    pub fn is_known_message(number: u16) -> bool {
        MesgNum::try_from(number).is_ok()
    }

    pub fn is_manufacturer_specific(number: u16) -> bool {
        (Self::MFG_RANGE_MIN..=Self::MFG_RANGE_MAX).contains(&number)
    }

    /// Field numbers this kind documents, in profile order.
    pub fn expected_field_numbers(self) -> &'static [u8] {
        match self {
            MesgNum::FileId => FileIdMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::Session => SessionMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::Lap => LapMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::Record => RecordMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::Event => EventMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::DeviceInfo => DeviceInfoMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::Activity => ActivityMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::FileCreator => FileCreatorMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::FieldDescription => FieldDescriptionMessage::EXPECTED_FIELD_NUMBERS,
            MesgNum::DeveloperDataId => DeveloperDataIdMessage::EXPECTED_FIELD_NUMBERS,
        }
    }

    /// Builds the per-kind payload from the extracted field map.
    pub fn from_extracted_fields(
        self,
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<MessageBody, FitError> {
        match self {
            MesgNum::FileId => FileIdMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                .map(MessageBody::FileId),
            MesgNum::Session => {
                SessionMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::Session)
            }
            MesgNum::Lap => LapMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                .map(MessageBody::Lap),
            MesgNum::Record => {
                RecordMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::Record)
            }
            MesgNum::Event => EventMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                .map(MessageBody::Event),
            MesgNum::DeviceInfo => {
                DeviceInfoMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::DeviceInfo)
            }
            MesgNum::Activity => {
                ActivityMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::Activity)
            }
            MesgNum::FileCreator => {
                FileCreatorMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::FileCreator)
            }
            MesgNum::FieldDescription => {
                FieldDescriptionMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::FieldDescription)
            }
            MesgNum::DeveloperDataId => {
                DeveloperDataIdMessage::from_extracted_fields(fields, error_on_invalid_enum_value)
                    .map(MessageBody::DeveloperDataId)
            }
        }
    }
}

/// Per-kind payload of a documented message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    FileId(FileIdMessage),
    Session(SessionMessage),
    Lap(LapMessage),
    Record(RecordMessage),
    Event(EventMessage),
    DeviceInfo(DeviceInfoMessage),
    Activity(ActivityMessage),
    FileCreator(FileCreatorMessage),
    FieldDescription(FieldDescriptionMessage),
    DeveloperDataId(DeveloperDataIdMessage),
}

// FIT type name: file
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum FileType {
    Device = 1,
    Settings = 2,
    Sport = 3,
    Activity = 4,
    Workout = 5,
    Course = 6,
    Schedules = 7,
    Weight = 9,
    Totals = 10,
    Goals = 11,
    BloodPressure = 14,
    MonitoringA = 15,
    ActivitySummary = 20,
    MonitoringDaily = 28,
    MonitoringB = 32,
    Segment = 34,
    SegmentList = 35,
    Invalid = 255,
}

impl FileType {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid FileType",
                value
            ))),
            Err(_) => Ok(FileType::Invalid),
        }
    }
}

// FIT type name: event
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EventCode {
    Timer = 0,
    Workout = 3,
    WorkoutStep = 4,
    PowerDown = 5,
    PowerUp = 6,
    OffCourse = 7,
    Session = 8,
    Lap = 9,
    CoursePoint = 10,
    Battery = 11,
    VirtualPartnerPace = 12,
    HrHighAlert = 13,
    HrLowAlert = 14,
    SpeedHighAlert = 15,
    SpeedLowAlert = 16,
    PowerHighAlert = 19,
    PowerLowAlert = 20,
    RecoveryHr = 21,
    BatteryLow = 22,
    TimeDurationAlert = 23,
    DistanceDurationAlert = 24,
    CalorieDurationAlert = 25,
    Activity = 26,
    FitnessEquipment = 27,
    Length = 28,
    Invalid = 255,
}

impl EventCode {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid EventCode",
                value
            ))),
            Err(_) => Ok(EventCode::Invalid),
        }
    }
}

// FIT type name: event_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EventType {
    Start = 0,
    Stop = 1,
    ConsecutiveDepreciated = 2,
    Marker = 3,
    StopAll = 4,
    BeginDepreciated = 5,
    EndDepreciated = 6,
    EndAllDepreciated = 7,
    StopDisable = 8,
    StopDisableAll = 9,
    Invalid = 255,
}

impl EventType {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid EventType",
                value
            ))),
            Err(_) => Ok(EventType::Invalid),
        }
    }
}

// FIT type name: sport
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Sport {
    Generic = 0,
    Running = 1,
    Cycling = 2,
    Transition = 3,
    FitnessEquipment = 4,
    Swimming = 5,
    Basketball = 6,
    Soccer = 7,
    Tennis = 8,
    AmericanFootball = 9,
    Training = 10,
    Walking = 11,
    CrossCountrySkiing = 12,
    AlpineSkiing = 13,
    Snowboarding = 14,
    Rowing = 15,
    Mountaineering = 16,
    Hiking = 17,
    Multisport = 18,
    Paddling = 19,
    All = 254,
    Invalid = 255,
}

impl Sport {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid Sport",
                value
            ))),
            Err(_) => Ok(Sport::Invalid),
        }
    }
}

// FIT type name: sub_sport
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SubSport {
    Generic = 0,
    Treadmill = 1,
    Street = 2,
    Trail = 3,
    Track = 4,
    Spin = 5,
    IndoorCycling = 6,
    Road = 7,
    Mountain = 8,
    Downhill = 9,
    Recumbent = 10,
    Cyclocross = 11,
    HandCycling = 12,
    TrackCycling = 13,
    IndoorRowing = 14,
    Elliptical = 15,
    StairClimbing = 16,
    LapSwimming = 17,
    OpenWater = 18,
    All = 254,
    Invalid = 255,
}

impl SubSport {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid SubSport",
                value
            ))),
            Err(_) => Ok(SubSport::Invalid),
        }
    }
}

// FIT type name: activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ActivityKind {
    Manual = 0,
    AutoMultiSport = 1,
    Invalid = 255,
}

impl ActivityKind {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid ActivityKind",
                value
            ))),
            Err(_) => Ok(ActivityKind::Invalid),
        }
    }
}

// FIT type name: battery_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum BatteryStatus {
    New = 1,
    Good = 2,
    Ok = 3,
    Low = 4,
    Critical = 5,
    Charging = 6,
    Unknown = 7,
    Invalid = 255,
}

impl BatteryStatus {
    pub fn from_value(value: u8, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid BatteryStatus",
                value
            ))),
            Err(_) => Ok(BatteryStatus::Invalid),
        }
    }
}

// FIT type name: manufacturer
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum Manufacturer {
    Garmin = 1,
    GarminFr405Antfs = 2,
    Zephyr = 3,
    Dayton = 4,
    Idt = 5,
    Srm = 6,
    Quarq = 7,
    Ibike = 8,
    Saris = 9,
    SparkHk = 10,
    Tanita = 11,
    Echowell = 12,
    DynastreamOem = 13,
    Nautilus = 14,
    Dynastream = 15,
    Timex = 16,
    Metrigear = 17,
    Xelic = 18,
    Beurer = 19,
    Cardiosport = 20,
    AAndD = 21,
    HmmLabs = 22,
    Suunto = 23,
    ThitaElektronik = 24,
    Gpulse = 25,
    CleanMobile = 26,
    PedalBrain = 27,
    Peaksware = 28,
    Saxonar = 29,
    LemondFitness = 30,
    Dexcom = 31,
    WahooFitness = 32,
    OctaneFitness = 33,
    Archinoetics = 34,
    TheHurtBox = 35,
    CitizenSystems = 36,
    Magellan = 37,
    Osynce = 38,
    Holux = 39,
    Concept2 = 40,
    OneGiantLeap = 42,
    AceSensor = 43,
    BrimBrothers = 44,
    Xplova = 45,
    PerceptionDigital = 46,
    Bf1systems = 47,
    Pioneer = 48,
    Spantec = 49,
    Metalogics = 50,
    Seiko = 52,
    Srs = 53,
    Mio = 54,
    Scribe = 55,
    Polar = 123,
    Development = 255,
    Invalid = 0xFFFF,
}

impl Manufacturer {
    pub fn from_value(value: u16, error_on_invalid_enum_value: bool) -> Result<Self, FitError> {
        match Self::try_from(value) {
            Ok(variant) => Ok(variant),
            Err(_) if error_on_invalid_enum_value => Err(FitError::Content(format!(
                "value {} is not a valid Manufacturer",
                value
            ))),
            Err(_) => Ok(Manufacturer::Invalid),
        }
    }
}

// FIT message name: file_id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileIdMessage {
    pub file_type: Option<FileType>,
    pub manufacturer: Option<Manufacturer>,
    pub product: Option<u16>,
    pub serial_number: Option<u32>,
    pub time_created: Option<u32>,
    pub number: Option<u16>,
    pub product_name: Option<String>,
}

impl FileIdMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[0, 1, 2, 3, 4, 5, 8];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let file_type = match fields.get(&0).and_then(Value::as_enum) {
            Some(raw) => Some(FileType::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let manufacturer = match fields.get(&1).and_then(Value::as_uint16) {
            Some(raw) => Some(Manufacturer::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(FileIdMessage {
            file_type,
            manufacturer,
            product: fields.get(&2).and_then(Value::as_uint16),
            serial_number: fields.get(&3).and_then(Value::as_uint32z),
            time_created: fields.get(&4).and_then(Value::as_uint32),
            number: fields.get(&5).and_then(Value::as_uint16),
            product_name: fields.get(&8).and_then(Value::as_string).map(String::from),
        })
    }
}

// FIT message name: file_creator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileCreatorMessage {
    pub software_version: Option<u16>,
    pub hardware_version: Option<u8>,
}

impl FileCreatorMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[0, 1];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        _error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        Ok(FileCreatorMessage {
            software_version: fields.get(&0).and_then(Value::as_uint16),
            hardware_version: fields.get(&1).and_then(Value::as_uint8),
        })
    }
}

// FIT message name: event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventMessage {
    pub timestamp: Option<u32>,
    pub event: Option<EventCode>,
    pub event_type: Option<EventType>,
    pub data16: Option<u16>,
    pub data: Option<u32>,
    pub event_group: Option<u8>,
}

impl EventMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[253, 0, 1, 2, 3, 4];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let event = match fields.get(&0).and_then(Value::as_enum) {
            Some(raw) => Some(EventCode::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let event_type = match fields.get(&1).and_then(Value::as_enum) {
            Some(raw) => Some(EventType::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(EventMessage {
            timestamp: fields.get(&253).and_then(Value::as_uint32),
            event,
            event_type,
            data16: fields.get(&2).and_then(Value::as_uint16),
            data: fields.get(&3).and_then(Value::as_uint32),
            event_group: fields.get(&4).and_then(Value::as_uint8),
        })
    }
}

// FIT message name: device_info
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceInfoMessage {
    pub timestamp: Option<u32>,
    pub device_index: Option<u8>,
    pub device_type: Option<u8>,
    pub manufacturer: Option<Manufacturer>,
    pub serial_number: Option<u32>,
    pub product: Option<u16>,
    pub software_version: Option<u16>,
    pub hardware_version: Option<u8>,
    pub battery_status: Option<BatteryStatus>,
    pub product_name: Option<String>,
}

impl DeviceInfoMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[253, 0, 1, 2, 3, 4, 5, 6, 11, 27];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let manufacturer = match fields.get(&2).and_then(Value::as_uint16) {
            Some(raw) => Some(Manufacturer::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let battery_status = match fields.get(&11).and_then(Value::as_uint8) {
            Some(raw) => Some(BatteryStatus::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(DeviceInfoMessage {
            timestamp: fields.get(&253).and_then(Value::as_uint32),
            device_index: fields.get(&0).and_then(Value::as_uint8),
            device_type: fields.get(&1).and_then(Value::as_uint8),
            manufacturer,
            serial_number: fields.get(&3).and_then(Value::as_uint32z),
            product: fields.get(&4).and_then(Value::as_uint16),
            software_version: fields.get(&5).and_then(Value::as_uint16),
            hardware_version: fields.get(&6).and_then(Value::as_uint8),
            battery_status,
            product_name: fields.get(&27).and_then(Value::as_string).map(String::from),
        })
    }
}

// FIT message name: record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordMessage {
    pub timestamp: Option<u32>,
    pub position_lat: Option<i32>,
    pub position_long: Option<i32>,
    pub altitude: Option<u16>,
    pub heart_rate: Option<u8>,
    pub cadence: Option<u8>,
    pub distance: Option<u32>,
    pub speed: Option<u16>,
    pub power: Option<u16>,
    pub temperature: Option<i8>,
    pub enhanced_speed: Option<u32>,
    pub enhanced_altitude: Option<u32>,
}

impl RecordMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] =
        &[253, 0, 1, 2, 3, 4, 5, 6, 7, 13, 73, 78];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        _error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        Ok(RecordMessage {
            timestamp: fields.get(&253).and_then(Value::as_uint32),
            position_lat: fields.get(&0).and_then(Value::as_sint32),
            position_long: fields.get(&1).and_then(Value::as_sint32),
            altitude: fields.get(&2).and_then(Value::as_uint16),
            heart_rate: fields.get(&3).and_then(Value::as_uint8),
            cadence: fields.get(&4).and_then(Value::as_uint8),
            distance: fields.get(&5).and_then(Value::as_uint32),
            speed: fields.get(&6).and_then(Value::as_uint16),
            power: fields.get(&7).and_then(Value::as_uint16),
            temperature: fields.get(&13).and_then(Value::as_sint8),
            enhanced_speed: fields.get(&73).and_then(Value::as_uint32),
            enhanced_altitude: fields.get(&78).and_then(Value::as_uint32),
        })
    }
}

// FIT message name: lap
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LapMessage {
    pub timestamp: Option<u32>,
    pub message_index: Option<u16>,
    pub event: Option<EventCode>,
    pub event_type: Option<EventType>,
    pub start_time: Option<u32>,
    pub start_position_lat: Option<i32>,
    pub start_position_long: Option<i32>,
    pub end_position_lat: Option<i32>,
    pub end_position_long: Option<i32>,
    pub total_elapsed_time: Option<u32>,
    pub total_timer_time: Option<u32>,
    pub total_distance: Option<u32>,
    pub total_calories: Option<u16>,
    pub avg_speed: Option<u16>,
    pub max_speed: Option<u16>,
    pub avg_heart_rate: Option<u8>,
    pub max_heart_rate: Option<u8>,
    pub sport: Option<Sport>,
}

impl LapMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[
        253, 254, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 13, 14, 15, 16, 25,
    ];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let event = match fields.get(&0).and_then(Value::as_enum) {
            Some(raw) => Some(EventCode::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let event_type = match fields.get(&1).and_then(Value::as_enum) {
            Some(raw) => Some(EventType::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let sport = match fields.get(&25).and_then(Value::as_enum) {
            Some(raw) => Some(Sport::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(LapMessage {
            timestamp: fields.get(&253).and_then(Value::as_uint32),
            message_index: fields.get(&254).and_then(Value::as_uint16),
            event,
            event_type,
            start_time: fields.get(&2).and_then(Value::as_uint32),
            start_position_lat: fields.get(&3).and_then(Value::as_sint32),
            start_position_long: fields.get(&4).and_then(Value::as_sint32),
            end_position_lat: fields.get(&5).and_then(Value::as_sint32),
            end_position_long: fields.get(&6).and_then(Value::as_sint32),
            total_elapsed_time: fields.get(&7).and_then(Value::as_uint32),
            total_timer_time: fields.get(&8).and_then(Value::as_uint32),
            total_distance: fields.get(&9).and_then(Value::as_uint32),
            total_calories: fields.get(&11).and_then(Value::as_uint16),
            avg_speed: fields.get(&13).and_then(Value::as_uint16),
            max_speed: fields.get(&14).and_then(Value::as_uint16),
            avg_heart_rate: fields.get(&15).and_then(Value::as_uint8),
            max_heart_rate: fields.get(&16).and_then(Value::as_uint8),
            sport,
        })
    }
}

// FIT message name: session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionMessage {
    pub timestamp: Option<u32>,
    pub message_index: Option<u16>,
    pub event: Option<EventCode>,
    pub event_type: Option<EventType>,
    pub start_time: Option<u32>,
    pub start_position_lat: Option<i32>,
    pub start_position_long: Option<i32>,
    pub sport: Option<Sport>,
    pub sub_sport: Option<SubSport>,
    pub total_elapsed_time: Option<u32>,
    pub total_timer_time: Option<u32>,
    pub total_distance: Option<u32>,
    pub total_calories: Option<u16>,
    pub avg_speed: Option<u16>,
    pub max_speed: Option<u16>,
    pub avg_heart_rate: Option<u8>,
    pub max_heart_rate: Option<u8>,
    pub first_lap_index: Option<u16>,
    pub num_laps: Option<u16>,
}

impl SessionMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[
        253, 254, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 14, 15, 16, 17, 25, 26,
    ];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let event = match fields.get(&0).and_then(Value::as_enum) {
            Some(raw) => Some(EventCode::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let event_type = match fields.get(&1).and_then(Value::as_enum) {
            Some(raw) => Some(EventType::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let sport = match fields.get(&5).and_then(Value::as_enum) {
            Some(raw) => Some(Sport::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let sub_sport = match fields.get(&6).and_then(Value::as_enum) {
            Some(raw) => Some(SubSport::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(SessionMessage {
            timestamp: fields.get(&253).and_then(Value::as_uint32),
            message_index: fields.get(&254).and_then(Value::as_uint16),
            event,
            event_type,
            start_time: fields.get(&2).and_then(Value::as_uint32),
            start_position_lat: fields.get(&3).and_then(Value::as_sint32),
            start_position_long: fields.get(&4).and_then(Value::as_sint32),
            sport,
            sub_sport,
            total_elapsed_time: fields.get(&7).and_then(Value::as_uint32),
            total_timer_time: fields.get(&8).and_then(Value::as_uint32),
            total_distance: fields.get(&9).and_then(Value::as_uint32),
            total_calories: fields.get(&11).and_then(Value::as_uint16),
            avg_speed: fields.get(&14).and_then(Value::as_uint16),
            max_speed: fields.get(&15).and_then(Value::as_uint16),
            avg_heart_rate: fields.get(&16).and_then(Value::as_uint8),
            max_heart_rate: fields.get(&17).and_then(Value::as_uint8),
            first_lap_index: fields.get(&25).and_then(Value::as_uint16),
            num_laps: fields.get(&26).and_then(Value::as_uint16),
        })
    }
}

// FIT message name: activity
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityMessage {
    pub timestamp: Option<u32>,
    pub total_timer_time: Option<u32>,
    pub num_sessions: Option<u16>,
    pub activity_type: Option<ActivityKind>,
    pub event: Option<EventCode>,
    pub event_type: Option<EventType>,
    pub local_timestamp: Option<u32>,
    pub event_group: Option<u8>,
}

impl ActivityMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[253, 0, 1, 2, 3, 4, 5, 6];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let activity_type = match fields.get(&2).and_then(Value::as_enum) {
            Some(raw) => Some(ActivityKind::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let event = match fields.get(&3).and_then(Value::as_enum) {
            Some(raw) => Some(EventCode::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        let event_type = match fields.get(&4).and_then(Value::as_enum) {
            Some(raw) => Some(EventType::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(ActivityMessage {
            timestamp: fields.get(&253).and_then(Value::as_uint32),
            total_timer_time: fields.get(&0).and_then(Value::as_uint32),
            num_sessions: fields.get(&1).and_then(Value::as_uint16),
            activity_type,
            event,
            event_type,
            local_timestamp: fields.get(&5).and_then(Value::as_uint32),
            event_group: fields.get(&6).and_then(Value::as_uint8),
        })
    }
}

// FIT message name: field_description
//
// Describes one developer field; preserved for consumers, not interpreted
// further by the decoder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDescriptionMessage {
    pub developer_data_index: Option<u8>,
    pub field_definition_number: Option<u8>,
    pub fit_base_type_id: Option<u8>,
    pub field_name: Option<String>,
    pub array: Option<u8>,
    pub units: Option<String>,
    pub native_field_num: Option<u8>,
}

impl FieldDescriptionMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[0, 1, 2, 3, 4, 8, 15];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        _error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        Ok(FieldDescriptionMessage {
            developer_data_index: fields.get(&0).and_then(Value::as_uint8),
            field_definition_number: fields.get(&1).and_then(Value::as_uint8),
            fit_base_type_id: fields.get(&2).and_then(Value::as_uint8),
            field_name: fields.get(&3).and_then(Value::as_string).map(String::from),
            array: fields.get(&4).and_then(Value::as_uint8),
            units: fields.get(&8).and_then(Value::as_string).map(String::from),
            native_field_num: fields.get(&15).and_then(Value::as_uint8),
        })
    }
}

// FIT message name: developer_data_id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeveloperDataIdMessage {
    pub developer_id: Option<Vec<u8>>,
    pub application_id: Option<Vec<u8>>,
    pub manufacturer_id: Option<Manufacturer>,
    pub developer_data_index: Option<u8>,
    pub application_version: Option<u32>,
}

impl DeveloperDataIdMessage {
    pub const EXPECTED_FIELD_NUMBERS: &'static [u8] = &[0, 1, 2, 3, 4];

    pub fn from_extracted_fields(
        fields: &HashMap<u8, Value>,
        error_on_invalid_enum_value: bool,
    ) -> Result<Self, FitError> {
        let manufacturer_id = match fields.get(&2).and_then(Value::as_uint16) {
            Some(raw) => Some(Manufacturer::from_value(raw, error_on_invalid_enum_value)?),
            None => None,
        };
        Ok(DeveloperDataIdMessage {
            developer_id: fields.get(&0).and_then(Value::as_byte_buffer),
            application_id: fields.get(&1).and_then(Value::as_byte_buffer),
            manufacturer_id,
            developer_data_index: fields.get(&3).and_then(Value::as_uint8),
            application_version: fields.get(&4).and_then(Value::as_uint32),
        })
    }
}
