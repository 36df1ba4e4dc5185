//! Servo angle to PWM duty mapping

/// Map an angle in degrees to a PWM duty value
///
/// Linear map from 0..=180 degrees into the servo's calibrated duty
/// range (`duty_min` at 0 degrees, `duty_max` at 180). Angles above 180
/// are clamped; range policy for commands lives in the responder.
pub fn angle_to_duty(angle: u8, duty_min: u16, duty_max: u16) -> u16 {
    let angle = u32::from(angle.min(180));
    let span = u32::from(duty_max.saturating_sub(duty_min));
    (u32::from(duty_min) + angle * span / 180) as u16
}
