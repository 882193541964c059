//! The only mutator of [`State`].

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    axis::AxisEdit,
    state::{DefaultDimensions, State},
    style::{Color, Style, StyleEdit, StyleId, normalize_all},
};

/// State transitions, serialized as `{ "type": ..., "payload": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Replace the font axes and rebuild every style's dimensions.
    SetDimensions(DefaultDimensions),
    Add,
    Delete { id: StyleId },
    Edit { id: StyleId, partial: StyleEdit },
    EditDimensions { id: StyleId, tag: String, partial: AxisEdit },
    EditAllowedColors { id: StyleId, is_added: bool, color: Color },
}

/// Source of fresh style ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> StyleId;
}

const NANO_ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";
const NANO_LENGTH: usize = 21;

/// Random 21-character URL-safe ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoIds;

impl IdGenerator for NanoIds {
    fn next_id(&mut self) -> StyleId {
        let mut rng = rand::thread_rng();
        (0..NANO_LENGTH)
            .map(|_| char::from(NANO_ALPHABET[rng.gen_range(0..NANO_ALPHABET.len())]))
            .collect()
    }
}

/// Deterministic ids: `style-1`, `style-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> StyleId {
        self.next += 1;
        format!("style-{}", self.next)
    }
}

/// Applies [`Action`]s to a [`State`].
///
/// Actions naming an absent style or axis leave the state unchanged.
#[derive(Debug, Clone, Default)]
pub struct Reducer<G = NanoIds> {
    ids: G,
}

impl<G: IdGenerator> Reducer<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Pure form: returns the next state, leaving `state` untouched.
    pub fn reduce(&mut self, state: &State, action: Action) -> State {
        let mut next = state.clone();
        self.apply(&mut next, action);
        next
    }

    /// Apply in place. Returns the id of the style created by [`Action::Add`].
    pub fn apply(&mut self, state: &mut State, action: Action) -> Option<StyleId> {
        match action {
            Action::SetDimensions(dimensions) => {
                for style in state.styles.values_mut() {
                    style.dimensions = normalize_all(dimensions.values());
                }
                debug!(
                    "set {} axes, rebuilt {} styles",
                    dimensions.len(),
                    state.styles.len()
                );
                state.default_dimensions = dimensions;
            }
            Action::Add => {
                let id = self.fresh_id(state);
                let style = Style::new(id.clone(), state.default_dimensions.values());
                state.styles.insert(id.clone(), style);
                debug!("added style {id}");
                return Some(id);
            }
            Action::Delete { id } => {
                if state.styles.shift_remove(&id).is_none() {
                    debug!("delete: no style {id}");
                }
            }
            Action::Edit { id, partial } => match state.styles.get_mut(&id) {
                Some(style) => style.apply(partial),
                None => debug!("edit: no style {id}"),
            },
            Action::EditDimensions { id, tag, partial } => {
                match state.styles.get_mut(&id).and_then(|s| s.dimensions.get_mut(&tag)) {
                    Some(axis) => axis.apply(&partial),
                    None => debug!("edit dimensions: no axis {tag} on style {id}"),
                }
            }
            Action::EditAllowedColors { id, is_added, color } => match state.styles.get_mut(&id) {
                Some(style) => style.toggle_allowed_color(color, is_added),
                None => debug!("edit colors: no style {id}"),
            },
        }
        None
    }

    fn fresh_id(&mut self, state: &State) -> StyleId {
        loop {
            let id = self.ids.next_id();
            if !state.styles.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisDescriptor;

    fn font_axes() -> DefaultDimensions {
        [
            AxisDescriptor::new("wght", 100.0, 400.0, 900.0),
            AxisDescriptor::new("wdth", 75.0, 100.0, 125.0),
        ]
        .into_iter()
        .map(|d| (d.tag.clone(), d))
        .collect()
    }

    fn reducer() -> Reducer<SequentialIds> {
        Reducer::new(SequentialIds::default())
    }

    #[test]
    fn add_seeds_axes_from_font() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        let id = reducer.apply(&mut state, Action::Add).unwrap();

        let style = &state.styles[&id];
        assert_eq!(style.dimensions["wght"].value, 400.0);
        assert_eq!(style.dimensions["wdth"].editor_max_value, 125.0);
    }

    #[test]
    fn add_without_font_has_no_axes() {
        let mut state = State::default();
        let id = reducer().apply(&mut state, Action::Add).unwrap();
        assert!(state.styles[&id].dimensions.is_empty());
    }

    #[test]
    fn add_then_delete_restores_state() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        reducer.apply(&mut state, Action::Add);
        let before = state.clone();

        let id = reducer.apply(&mut state, Action::Add).unwrap();
        reducer.apply(&mut state, Action::Delete { id });

        assert_eq!(state, before);
    }

    #[test]
    fn set_dimensions_drops_stale_tags() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        let id = reducer.apply(&mut state, Action::Add).unwrap();

        let opsz = AxisDescriptor::new("opsz", 8.0, 14.0, 144.0);
        let next = [(opsz.tag.clone(), opsz)].into_iter().collect();
        reducer.apply(&mut state, Action::SetDimensions(next));

        let tags: Vec<_> = state.styles[&id].dimensions.keys().cloned().collect();
        assert_eq!(tags, ["opsz"]);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn set_dimensions_discards_axis_edits() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        let id = reducer.apply(&mut state, Action::Add).unwrap();
        reducer.apply(
            &mut state,
            Action::EditDimensions { id: id.clone(), tag: "wght".into(), partial: AxisEdit::value(700.0) },
        );

        reducer.apply(&mut state, Action::SetDimensions(font_axes()));

        assert_eq!(state.styles[&id].dimensions["wght"].value, 400.0);
    }

    #[test]
    fn edit_merges_fields_and_keeps_axes() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        let id = reducer.apply(&mut state, Action::Add).unwrap();
        reducer.apply(
            &mut state,
            Action::EditDimensions { id: id.clone(), tag: "wght".into(), partial: AxisEdit::value(650.0) },
        );
        let axes = state.styles[&id].dimensions.clone();

        reducer.apply(&mut state, Action::Edit { id: id.clone(), partial: StyleEdit::flyout(true) });
        reducer.apply(
            &mut state,
            Action::Edit { id: id.clone(), partial: StyleEdit::font_description("Condensed bold") },
        );

        let style = &state.styles[&id];
        assert!(style.has_flyout_open);
        assert_eq!(style.font_description, "Condensed bold");
        assert_eq!(style.name, crate::config::DEFAULT_STYLE_NAME);
        assert_eq!(style.dimensions, axes);
        assert_eq!(style.dimensions["wght"].value, 650.0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        let before = state.clone();

        reducer.apply(&mut state, Action::Delete { id: "missing".into() });
        reducer.apply(&mut state, Action::Edit { id: "missing".into(), partial: StyleEdit::name("x") });
        reducer.apply(
            &mut state,
            Action::EditDimensions { id: "missing".into(), tag: "wght".into(), partial: AxisEdit::value(1.0) },
        );

        assert_eq!(state, before);
    }

    #[test]
    fn edit_dimensions_on_unknown_tag_adds_nothing() {
        let mut reducer = reducer();
        let mut state = State::default();
        reducer.apply(&mut state, Action::SetDimensions(font_axes()));
        let id = reducer.apply(&mut state, Action::Add).unwrap();

        reducer.apply(
            &mut state,
            Action::EditDimensions { id: id.clone(), tag: "GRAD".into(), partial: AxisEdit::value(1.0) },
        );

        assert!(!state.styles[&id].dimensions.contains_key("GRAD"));
        assert_eq!(state.styles[&id].dimensions.len(), 2);
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let state = State::default();
        let next = reducer().reduce(&state, Action::Add);
        assert!(!state.has_styles());
        assert!(next.has_styles());
    }

    #[test]
    fn nano_ids_are_url_safe() {
        let id = NanoIds.next_id();
        assert_eq!(id.len(), NANO_LENGTH);
        assert!(id.bytes().all(|b| NANO_ALPHABET.contains(&b)));
    }

    #[test]
    fn colliding_ids_are_regenerated() {
        struct Repeat(Vec<&'static str>);
        impl IdGenerator for Repeat {
            fn next_id(&mut self) -> StyleId {
                self.0.remove(0).to_string()
            }
        }

        let mut reducer = Reducer::new(Repeat(vec!["a", "a", "b"]));
        let mut state = State::default();
        assert_eq!(reducer.apply(&mut state, Action::Add).as_deref(), Some("a"));
        assert_eq!(reducer.apply(&mut state, Action::Add).as_deref(), Some("b"));
    }

    #[test]
    fn actions_use_type_payload_shape() {
        let action = Action::EditDimensions {
            id: "a".into(),
            tag: "wght".into(),
            partial: AxisEdit::range_mode(true),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "editDimensions");
        assert_eq!(json["payload"]["partial"]["isValueRange"], true);

        let add: Action = serde_json::from_str(r#"{"type":"add"}"#).unwrap();
        assert_eq!(add, Action::Add);
    }
}
