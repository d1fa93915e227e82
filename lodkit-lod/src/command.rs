//! Operator commands
//!
//! Each panel button or field edit maps to one [`Command`]. The
//! [`Dispatcher`] runs it against a session and a host.

use crate::generator::{GenerationReport, LodGenerator};
use crate::host::{LodHost, ObjectId};
use crate::session::LodSession;
use lodkit_core::Result;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add the pending ratio to the level list
    AddDecimation,
    /// Remove the selected level
    RemoveDecimation,
    /// Restore descending order after in-place edits
    ReorderDecimations,
    SetPendingRatio(f32),
    SelectDecimation(usize),
    SetSliceEnabled(bool),
    SetSegments([u32; 3]),
    /// Slice every selected object without generating LODs
    SliceSelected,
    /// Sort the level list, then build LOD sets for every selected object
    GenerateLods,
}

#[derive(Debug)]
pub enum Outcome {
    Finished,
    Sliced(Vec<ObjectId>),
    Generated(GenerationReport),
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    pub generator: LodGenerator,
}

impl Dispatcher {
    pub fn new(generator: LodGenerator) -> Self {
        Self { generator }
    }

    /// Run one command. The session is activated first if needed.
    pub fn dispatch<H: LodHost + ?Sized>(
        &self,
        session: &mut LodSession,
        host: &mut H,
        selection: &[ObjectId],
        command: Command,
    ) -> Result<Outcome> {
        session.activate()?;

        match command {
            Command::AddDecimation => session.add_pending()?,
            Command::RemoveDecimation => {
                session.remove_active()?;
            }
            Command::ReorderDecimations => session.levels_mut().reorder(),
            Command::SetPendingRatio(ratio) => session.set_pending_ratio(ratio)?,
            Command::SelectDecimation(index) => session.select(index)?,
            Command::SetSliceEnabled(enabled) => session.set_slice_enabled(enabled),
            Command::SetSegments(segments) => session.set_segments(segments)?,
            Command::SliceSelected => {
                let mut objects = Vec::new();
                for &object in selection {
                    objects.extend(self.generator.slice_object(host, object, &session.slice)?);
                }
                info!("Sliced {} selected objects into {}", selection.len(), objects.len());
                return Ok(Outcome::Sliced(objects));
            }
            Command::GenerateLods => {
                if !session.levels().is_sorted() {
                    session.levels_mut().reorder();
                }
                let report =
                    self.generator
                        .generate(host, selection, session.levels(), &session.slice)?;
                return Ok(Outcome::Generated(report));
            }
        }

        Ok(Outcome::Finished)
    }
}
