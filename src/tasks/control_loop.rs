use embassy_futures::select::{select, Either};
use embassy_time::Instant;

use crate::consts::{CONTROL_DT, MAX_LEDS};
use crate::control::{ControlLaw, DucklingMode};
use crate::hw_abstraction::LedStrip;
use crate::led::composer::Heartbeat;
use crate::led::encoder::encode_frame;
use crate::signals;

const ID: &str = "control_loop";

/// The control loop task: consume attitude samples and discrete commands,
/// run the control law, publish actuator commands and status records.
///
/// Every received command also flips the LED strip between the two status
/// colors, a liveness indicator for the operator on the command link.
pub async fn main(mut leds: impl LedStrip, led_num: usize) {
    if led_num > MAX_LEDS {
        warn!("{}: Strip length {} exceeds the supported {}", ID, led_num, MAX_LEDS);
    }
    let led_num = led_num.min(MAX_LEDS);

    // Input channels
    let mut rcv_attitude_sample = signals::ATTITUDE_SAMPLE.receiver().unwrap();
    let mut rcv_shutdown = signals::SHUTDOWN.receiver().unwrap();

    // Output channels
    let snd_actuator_controls = signals::ACTUATOR_CONTROLS.sender();
    let snd_controller_status = signals::CONTROLLER_STATUS.sender();

    let mut engine = ControlLaw::new();
    let mut heartbeat = Heartbeat::new();
    let mut prev_rollspeed = 0.0;

    info!("{}: Task started", ID);

    loop {
        if rcv_shutdown.try_changed() == Some(true) {
            engine.set_mode(DucklingMode::Silence);
            snd_actuator_controls.send((engine.command(), Instant::now()));
            info!("{}: Motors idled, task stopping", ID);
            break;
        }

        match select(
            rcv_attitude_sample.changed(),
            signals::COMMAND_QUEUE.receive(),
        )
        .await
        {
            Either::First(mut sample) => {
                // The estimator delivers angle and rate only, the
                // acceleration is differenced here at the tick rate
                sample.rollacc = (sample.rollspeed - prev_rollspeed) / CONTROL_DT;
                prev_rollspeed = sample.rollspeed;

                let command = engine.tick(sample);
                snd_actuator_controls.send((command, Instant::now()));

                if let Some(status) = engine.take_status() {
                    snd_controller_status.send(status);
                }
            }
            Either::Second(command) => {
                engine.handle_command(&command);
                if let Some(status) = engine.take_status() {
                    snd_controller_status.send(status);
                }

                let frame = heartbeat.next_frame(led_num);
                match encode_frame(&frame) {
                    // Display is best-effort, a failed write never
                    // stalls the control path
                    Ok(symbols) => {
                        if let Err(error) = leds.write(&symbols).await {
                            warn!("{}: LED write failed: {}", ID, error);
                        }
                    }
                    Err(error) => warn!("{}: Frame encoding failed: {}", ID, error),
                }
            }
        }
    }
}
