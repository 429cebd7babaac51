use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::Instant;

use crate::types::{
    actuators::ActuatorCommand, attitude::AttitudeSample, command::Command, status::StatusRecord,
};

macro_rules! watch {
    ($name:ident, $datatype:ty, $num:literal) => {
        watch!($name, $datatype, $num, "Watch channel");
    };
    ($name:ident, $datatype:ty, $num:literal, $doc:expr) => {
        #[doc = $doc]
        pub static $name: embassy_sync::watch::Watch<CriticalSectionRawMutex, $datatype, $num> =
            embassy_sync::watch::Watch::new();
    };
}

watch!(
    ATTITUDE_SAMPLE,
    AttitudeSample,
    4,
    "Periodic roll-attitude samples from the estimator, delivered at the control tick rate."
);
watch!(
    ACTUATOR_CONTROLS,
    (ActuatorCommand, Instant),
    2,
    "Actuator command published by the control loop once per tick, with a timestamp."
);
watch!(
    CONTROLLER_STATUS,
    StatusRecord,
    2,
    "Status record published on anchor calibration completion and parameter changes."
);
watch!(
    SHUTDOWN,
    bool,
    4,
    "Cooperative shutdown request, observed by tasks at tick granularity."
);

/// Queue of discrete controller commands from the telemetry bus. The
/// control loop handles at most one pending command per tick.
pub static COMMAND_QUEUE: Channel<CriticalSectionRawMutex, Command, 8> = Channel::new();
