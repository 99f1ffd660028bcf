use std::{rc::Rc, sync::Arc};

use anyhow::{Context, Result};
use cube_content::{ComponentSelected, ContentReference, ContentResolver, SelectionBus};
use cube_view::{CubeFrame, CubeView, ManualScheduler, PointerEvent, ZoomDirection};
use faces::Face;
use settings::{SettingsStore, UserSettings};
use tracing_subscriber::EnvFilter;

const FRAME_MS: f64 = 1000.0 / 60.0;
const SESSION_FRAMES: u32 = 120;

fn main() -> Result<()> {
    let settings_store = match std::env::args().nth(1) {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::new().context("settings store init failed")?,
    };
    let loaded = settings_store.load();

    let default_filter = loaded
        .as_ref()
        .ok()
        .and_then(|settings| settings.log_filter.clone())
        .unwrap_or_else(|| "info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();

    let user_settings = match loaded {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                path = %settings_store.path().display(),
                "using default settings (failed to load): {err}"
            );
            UserSettings::default()
        }
    };

    let registry = cards::builtin_registry().context("failed to register built-in cards")?;
    tracing::info!(cards = registry.len(), "registered cards");
    let resolver: Rc<dyn ContentResolver> = Rc::new(registry);
    let bus = Arc::new(SelectionBus::new());

    let mut view = CubeView::init(&user_settings, resolver, Arc::clone(&bus), ManualScheduler::new());
    run_session(&mut view, &bus);
    for entry in view.diagnostics().entries() {
        tracing::debug!("{entry}");
    }
    view.dispose();
    Ok(())
}

/// Drives a scripted session: auto-rotation, a drag, a zoom and a selection event.
fn run_session(view: &mut CubeView<ManualScheduler>, bus: &SelectionBus) {
    let mut timestamp = 0.0;
    for frame_index in 0..SESSION_FRAMES {
        match frame_index {
            30 => {
                view.pointer(PointerEvent::Down { x: 100.0, y: 100.0 });
            }
            31..=40 => {
                let step = (frame_index - 30) as f32;
                view.pointer(PointerEvent::Move {
                    x: 100.0 + step * 3.0,
                    y: 100.0 - step,
                });
            }
            41 => {
                view.pointer(PointerEvent::Up);
            }
            60 | 61 => {
                view.zoom(ZoomDirection::In);
            }
            80 => {
                let delivered = bus.publish(ComponentSelected::new(
                    ContentReference::new("Clock").with_property("format", "12h"),
                ));
                tracing::info!(delivered, "published selection");
            }
            _ => {}
        }

        let Some(id) = view.scheduler_mut().take_due() else {
            tracing::warn!(frame_index, "animation loop stopped early");
            break;
        };
        timestamp += FRAME_MS;
        if let Some(frame) = view.on_frame(id, timestamp) {
            if frame_index % 30 == 0 || frame_index == SESSION_FRAMES - 1 {
                log_frame(frame_index, &frame);
            }
        }
    }
}

fn log_frame(frame_index: u32, frame: &CubeFrame) {
    let front = frame.face(Face::Front);
    tracing::info!(
        frame_index,
        facing = %frame.facing,
        group = %frame.group_transform,
        front = %front.content.summary(),
        "frame composed"
    );
}
