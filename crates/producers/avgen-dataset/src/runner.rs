use std::thread;

use log::error;

use avgen_core::client::{ClientError, SimulatorWorld};

use crate::capture::CaptureLoop;

/// Drives the capture to completion with fixed real-time pacing between
/// ticks. Teardown is guaranteed: the loop's resources are released before
/// the outcome is returned, whether the run completed or aborted.
pub fn run_capture<W>(mut capture: CaptureLoop<W>) -> Result<(), ClientError>
where
    W: SimulatorWorld,
{
    capture.initialize();
    let mut outcome = Ok(());
    while !capture.is_done() {
        if let Err(e) = capture.trigger() {
            error!("Capture aborted: {}", e);
            outcome = Err(e);
            break;
        }
        thread::sleep(capture.pace());
    }
    capture.terminate();
    outcome
}
