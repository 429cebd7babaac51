use crate::config::TrainerConfig;
use crate::hw_abstraction::LedStrip;
use crate::led::composer::trainer_frame;
use crate::led::encoder::encode_frame;
use crate::signals;

const ID: &str = "trainer";

/// The trainer display task: render the anchor-corrected roll state onto
/// a second LED strip, one frame per attitude sample.
pub async fn main(cfg: TrainerConfig, mut leds: impl LedStrip) {
    let mut rcv_attitude_sample = signals::ATTITUDE_SAMPLE.receiver().unwrap();
    let mut rcv_shutdown = signals::SHUTDOWN.receiver().unwrap();

    info!("{}: Task started, driving {} LEDs", ID, cfg.led_num);

    loop {
        if rcv_shutdown.try_changed() == Some(true) {
            info!("{}: Task stopping", ID);
            break;
        }

        let sample = rcv_attitude_sample.changed().await;

        let frame = trainer_frame(&cfg, sample.roll, sample.rollspeed);
        match encode_frame(&frame) {
            Ok(symbols) => {
                if let Err(error) = leds.write(&symbols).await {
                    warn!("{}: LED write failed: {}", ID, error);
                }
            }
            Err(error) => warn!("{}: Frame encoding failed: {}", ID, error),
        }
    }
}
