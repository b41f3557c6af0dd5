//! Directive handlers.
//!
//! One function per (namespace, name) pair in the dispatch table. Each
//! handler performs the device/scene action, then builds a response whose
//! context reflects the commanded value — the non-waiting handlers never
//! re-read state racing the command they just issued. Only lock/unlock
//! wait for the command to reach a terminal state.

use futures::future::BoxFuture;
use serde_json::{json, Value};

use crate::capability::interfaces;
use crate::context::BridgeContext;
use crate::controller::resolve;
use crate::error::AlexaError;
use crate::gateway::{ChannelTarget, CommandRef, Device, GatewayError};

use super::dispatcher::TargetEntity;
use super::request::Directive;
use super::response::{ResponseContext, ResponseEnvelope};

/// Handler signature stored in the dispatch table.
pub type HandlerFn = for<'a> fn(
    &'a BridgeContext,
    &'a Directive,
    &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>>;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn require_device<'a>(
    directive: &Directive,
    target: &'a TargetEntity,
) -> Result<&'a dyn Device, AlexaError> {
    match target {
        TargetEntity::Device(device) => Ok(device.as_ref()),
        TargetEntity::Scene(scene) => Err(AlexaError::UnsupportedInterface {
            interface: directive.header.namespace.clone(),
            endpoint_id: scene.scene_id().to_string(),
        }),
    }
}

/// Resolve controllers for the device and build the response context,
/// overriding the just-changed property with the commanded value.
fn device_context(
    device: &dyn Device,
    overridden: Option<(&str, &str, Value)>,
) -> Result<ResponseContext, AlexaError> {
    let state = device.status()?;
    let controllers = resolve(device.platform(), device.features(), &state);
    Ok(ResponseContext::from_controllers(&controllers, overridden))
}

fn payload_f64(directive: &Directive, field: &str) -> Result<f64, AlexaError> {
    directive.payload.get(field).and_then(Value::as_f64).ok_or_else(|| {
        AlexaError::MalformedDirective(format!("missing numeric payload field: {field}"))
    })
}

/// Fire an action and compose the optimistic response in one go.
async fn act_and_respond(
    directive: &Directive,
    device: &dyn Device,
    command: Result<CommandRef, GatewayError>,
    overridden: (&str, &str, Value),
) -> Result<ResponseEnvelope, AlexaError> {
    command?;
    let context = device_context(device, Some(overridden))?;
    Ok(ResponseEnvelope::response(directive, context))
}

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

pub fn turn_on<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let command = device.turn_on().await;
        act_and_respond(directive, device, command, (interfaces::POWER, "powerState", json!("ON")))
            .await
    })
}

pub fn turn_off<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let command = device.turn_off().await;
        act_and_respond(directive, device, command, (interfaces::POWER, "powerState", json!("OFF")))
            .await
    })
}

// ---------------------------------------------------------------------------
// Brightness / power level / percentage — all map to set_percent
// ---------------------------------------------------------------------------

pub fn set_brightness<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let brightness = payload_f64(directive, "brightness")?;
        let command = device.set_percent(brightness).await;
        act_and_respond(
            directive,
            device,
            command,
            (interfaces::BRIGHTNESS, "brightness", json!(brightness)),
        )
        .await
    })
}

pub fn set_power_level<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let level = payload_f64(directive, "powerLevel")?;
        let command = device.set_percent(level).await;
        act_and_respond(
            directive,
            device,
            command,
            (interfaces::POWER_LEVEL, "powerLevel", json!(level)),
        )
        .await
    })
}

pub fn set_percentage<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let percentage = payload_f64(directive, "percentage")?;
        let command = device.set_percent(percentage).await;
        act_and_respond(
            directive,
            device,
            command,
            (interfaces::PERCENTAGE, "percentage", json!(percentage)),
        )
        .await
    })
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

pub fn set_color<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let color = directive
            .payload
            .get("color")
            .cloned()
            .ok_or_else(|| AlexaError::MalformedDirective("missing color payload".to_string()))?;
        let hue = color.get("hue").and_then(Value::as_f64).unwrap_or(0.0);
        let saturation = color.get("saturation").and_then(Value::as_f64).unwrap_or(0.0);
        let brightness = color.get("brightness").and_then(Value::as_f64).unwrap_or(0.0);

        let command = device.set_color(hue, saturation, brightness).await;
        act_and_respond(directive, device, command, (interfaces::COLOR, "color", color)).await
    })
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

pub fn change_channel<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let device = require_device(directive, target)?;
        let channel_value = directive
            .payload
            .get("channel")
            .cloned()
            .ok_or_else(|| AlexaError::MalformedDirective("missing channel payload".to_string()))?;
        let channel: ChannelTarget = serde_json::from_value(channel_value.clone())
            .map_err(|e| AlexaError::MalformedDirective(e.to_string()))?;

        let command = device.set_channel(&channel).await;
        act_and_respond(
            directive,
            device,
            command,
            (interfaces::CHANNEL, "channel", channel_value),
        )
        .await
    })
}

// ---------------------------------------------------------------------------
// Lock / unlock — bounded wait for a terminal state
// ---------------------------------------------------------------------------

async fn lock_common<'a>(
    ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
    lock: bool,
) -> Result<ResponseEnvelope, AlexaError> {
    let device = require_device(directive, target)?;
    let command = if lock {
        device.lock().await?
    } else {
        device.unlock().await?
    };

    // Unlike the optimistic handlers, lock state is only reported once the
    // command reaches a terminal state within the bound. A timed-out wait
    // is a failed directive, never a guessed end state, and is not
    // retried. The bound is enforced here as well, in case a registry
    // implementation ignores it.
    let timeout = ctx.config.lock_timeout;
    let wait = ctx.devices.wait_for_command(&command, timeout);
    let status = match tokio::time::timeout(timeout, wait).await {
        Ok(result) => result?,
        Err(_) => return Err(AlexaError::CommandTimeout { timeout }),
    };
    if !status.is_terminal() {
        return Err(AlexaError::CommandTimeout { timeout });
    }
    if status == crate::gateway::CommandStatus::Failed {
        return Err(GatewayError::CommandFailed {
            device_id: device.device_id().to_string(),
            message: format!("{} command failed", if lock { "lock" } else { "unlock" }),
        }
        .into());
    }

    let target_state = if lock { "LOCKED" } else { "UNLOCKED" };
    let context = device_context(device, Some((interfaces::LOCK, "lockState", json!(target_state))))?;
    Ok(ResponseEnvelope::response(directive, context))
}

pub fn lock<'a>(
    ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(lock_common(ctx, directive, target, true))
}

pub fn unlock<'a>(
    ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(lock_common(ctx, directive, target, false))
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

pub fn scene_activate<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        match target {
            TargetEntity::Scene(scene) => {
                scene.start().await?;
                Ok(ResponseEnvelope::scene_event(directive, "ActivationStarted"))
            }
            TargetEntity::Device(device) => Err(AlexaError::UnsupportedInterface {
                interface: directive.header.namespace.clone(),
                endpoint_id: device.device_id().to_string(),
            }),
        }
    })
}

pub fn scene_deactivate<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        match target {
            TargetEntity::Scene(scene) => {
                scene.stop().await?;
                Ok(ResponseEnvelope::scene_event(directive, "DeactivationStarted"))
            }
            TargetEntity::Device(device) => Err(AlexaError::UnsupportedInterface {
                interface: directive.header.namespace.clone(),
                endpoint_id: device.device_id().to_string(),
            }),
        }
    })
}

// ---------------------------------------------------------------------------
// State report
// ---------------------------------------------------------------------------

pub fn report_state<'a>(
    _ctx: &'a BridgeContext,
    directive: &'a Directive,
    target: &'a TargetEntity,
) -> BoxFuture<'a, Result<ResponseEnvelope, AlexaError>> {
    Box::pin(async move {
        let context = match target {
            TargetEntity::Device(device) => device_context(device.as_ref(), None)?,
            // Scenes expose no retrievable controller properties; the
            // report carries only the health snapshot.
            TargetEntity::Scene(_) => ResponseContext::from_controllers(&[], None),
        };
        Ok(ResponseEnvelope::state_report(directive, context))
    })
}
