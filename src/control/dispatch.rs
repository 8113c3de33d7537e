// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Apply decoded packet commands to the actuator.

use crate::motors::Actuator;
use crate::protocol::{Command, CommandPacket};
use crate::{log_debug, log_info, log_warn};

/// Decode and execute one packet. Unknown commands are logged and have no effect.
pub fn execute_packet<A: Actuator>(actuator: &mut A, packet: &CommandPacket) {
    log_info!(
        "Received command {} | units {}",
        packet.command_id,
        packet.parameter.raw()
    );

    match packet.command() {
        Ok(command) => execute(actuator, command),
        Err(unknown) => log_warn!(
            "Unknown command {} (parameter {})",
            unknown.id,
            unknown.parameter
        ),
    }
}

/// Execute one command.
pub fn execute<A: Actuator>(actuator: &mut A, command: Command) {
    match command {
        Command::StopAll => actuator.stop_all(),
        Command::SetGun(fire) => actuator.set_trigger(fire),
        Command::Pulse { side, direction } => actuator.pulse(side, direction),
        Command::SetVelocity { side, velocity } => {
            log_info!("Set {:?} velocity {}", side, velocity);
            actuator.set_velocity(side, velocity);
        }
        Command::Reserved(id) => log_debug!("Command {} reserved in this layout", id),
    }
}
