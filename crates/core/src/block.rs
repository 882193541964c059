//! The component driving the reducer: state, persistence, asset changes and
//! slider drags.

use std::{collections::HashMap, time::Instant};

use font_axes::FontParser;
use log::{debug, info, warn};

use crate::{
    asset::FontAsset,
    axis::{AxisEdit, EditableAxis},
    config::Options,
    css,
    error::{FontError, Result},
    persist::{SettingsDocument, SettingsRepository, migrate},
    rate_limit::DragCommitter,
    reconcile::{AssetGate, GateCheck, check_extension, reconcile},
    reducer::{Action, IdGenerator, NanoIds, Reducer},
    state::{DefaultDimensions, State},
    style::StyleId,
};

/// Outcome of [`Block::sync_asset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSync {
    /// Same asset as last time; nothing was done.
    Unchanged,
    /// Axes replaced from the new asset.
    Reconciled,
    /// The asset was refused, now or on an earlier call; see [`Block::error`].
    Rejected,
    /// No asset attached.
    Detached,
}

type DragKey = (StyleId, String);

/// A variable font styles block.
///
/// Owns the [`State`] exclusively; every change goes through
/// [`Block::dispatch`] and is saved to the repository right after.
#[derive(Debug)]
pub struct Block<R, G = NanoIds> {
    state: State,
    reducer: Reducer<G>,
    repository: R,
    options: Options,
    gate: AssetGate,
    error: Option<FontError>,
    drags: HashMap<DragKey, DragCommitter<AxisEdit>>,
}

impl<R: SettingsRepository> Block<R> {
    pub fn open(repository: R, options: Options) -> Self {
        Self::with_ids(repository, options, NanoIds)
    }
}

impl<R: SettingsRepository, G: IdGenerator> Block<R, G> {
    /// Load and migrate stored settings. Unreadable settings start empty.
    pub fn with_ids(repository: R, options: Options, ids: G) -> Self {
        let document = match repository.load() {
            Ok(Some(value)) => migrate(value).unwrap_or_else(|e| {
                warn!("discarding stored settings: {e}");
                SettingsDocument::default()
            }),
            Ok(None) => SettingsDocument::default(),
            Err(e) => {
                warn!("failed to load settings: {e}");
                SettingsDocument::default()
            }
        };
        debug!("opened block with {} styles", document.state.styles.len());

        Self {
            state: document.state,
            reducer: Reducer::new(ids),
            repository,
            options,
            gate: AssetGate::new(document.asset_id),
            error: None,
            drags: HashMap::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The last asset rejection, if the current asset was refused.
    pub fn error(&self) -> Option<&FontError> {
        self.error.as_ref()
    }

    /// Message shown in place of the block body.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Apply an action and save. Returns the id of a newly added style.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<StyleId>> {
        let created = self.reducer.apply(&mut self.state, action);
        self.drags.retain(|(id, _), _| self.state.styles.contains_key(id));
        self.save()?;
        Ok(created)
    }

    fn save(&mut self) -> Result<()> {
        let document = SettingsDocument::new(self.state.clone(), self.gate.reconciled().map(str::to_string));
        self.repository.save(&document)
    }

    /// Reconcile axes with the attached asset, once per asset id.
    ///
    /// Only a reconciled asset id is saved. A refused asset keeps its error
    /// until it is detached or replaced, and is checked again the next time
    /// the block opens.
    pub fn sync_asset<P: FontParser>(
        &mut self,
        asset: Option<&FontAsset>,
        parser: &P,
    ) -> Result<AssetSync> {
        let Some(asset) = asset else {
            self.gate.clear();
            self.error = None;
            return Ok(AssetSync::Detached);
        };

        match self.gate.check(&asset.id) {
            GateCheck::Reconciled => {
                self.gate.clear();
                self.error = None;
                return Ok(AssetSync::Unchanged);
            }
            GateCheck::Rejected => return Ok(AssetSync::Rejected),
            GateCheck::New => {}
        }

        match self.load_axes(asset, parser) {
            Ok(dimensions) => {
                info!("asset {} ({}): {} axes", asset.id, asset.title, dimensions.len());
                self.gate.accept(&asset.id);
                self.error = None;
                self.dispatch(Action::SetDimensions(dimensions))?;
                Ok(AssetSync::Reconciled)
            }
            Err(e) => {
                warn!("asset {} rejected: {e}", asset.id);
                self.gate.reject(&asset.id);
                self.error = Some(e);
                Ok(AssetSync::Rejected)
            }
        }
    }

    fn load_axes<P: FontParser>(
        &self,
        asset: &FontAsset,
        parser: &P,
    ) -> std::result::Result<DefaultDimensions, FontError> {
        check_extension(&asset.extension, &self.options)?;
        let table = parser.parse(asset.source())?;
        reconcile(table.as_ref())
    }

    /// One slider step. Returns the axis to show locally when the throttle
    /// allows; commits happen when the debounce releases a value.
    pub fn drag_axis(
        &mut self,
        id: &str,
        tag: &str,
        edit: AxisEdit,
        now: Instant,
    ) -> Result<Option<EditableAxis>> {
        let Some(current) = self.state.style(id).and_then(|s| s.dimensions.get(tag)) else {
            return Ok(None);
        };
        let mut preview = current.clone();

        let key = (id.to_string(), tag.to_string());
        let committer = self.drags.entry(key).or_insert_with(|| {
            DragCommitter::new(self.options.throttle_interval(), self.options.commit_debounce)
        });
        let update = committer.drag(edit, now);

        if let Some(commit) = update.commit {
            self.commit_axis(id, tag, commit)?;
        }
        Ok(update.local.map(|edit| {
            preview.apply(&edit);
            preview
        }))
    }

    /// Commit every drag whose debounce has elapsed.
    pub fn poll_drags(&mut self, now: Instant) -> Result<usize> {
        let due: Vec<(DragKey, AxisEdit)> = self
            .drags
            .iter_mut()
            .filter_map(|(key, committer)| committer.poll(now).map(|edit| (key.clone(), edit)))
            .collect();

        for ((id, tag), edit) in &due {
            self.commit_axis(id, tag, *edit)?;
        }
        Ok(due.len())
    }

    /// Drag released: the final value is committed if still pending.
    pub fn end_axis_drag(&mut self, id: &str, tag: &str) -> Result<bool> {
        let pending = self
            .drags
            .remove(&(id.to_string(), tag.to_string()))
            .and_then(|mut committer| committer.end());
        match pending {
            Some(edit) => self.commit_axis(id, tag, edit).map(|()| true),
            None => Ok(false),
        }
    }

    fn commit_axis(&mut self, id: &str, tag: &str, edit: AxisEdit) -> Result<()> {
        self.dispatch(Action::EditDimensions { id: id.to_string(), tag: tag.to_string(), partial: edit })
            .map(|_| ())
    }

    /// Stylesheet for previewing every style with the attached asset.
    pub fn stylesheet(&self, asset: Option<&FontAsset>) -> String {
        css::block_stylesheet(asset, &self.state)
    }
}
