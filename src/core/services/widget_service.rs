use tracing::debug;

use crate::core::context::ProjectionContext;
use crate::domain::{position_of, widget::Widget, EntityId};
use crate::ledger::widget_value;
use crate::storage::{RecordStore, SettingsStore};

use super::{ServiceError, ServiceResult};

/// Settings key holding the ordered widget list.
pub const WIDGETS_KEY: &str = "dashboard_widgets";

/// Manages the dashboard widget registry and computes widget values.
pub struct WidgetService;

impl WidgetService {
    /// Widgets in display order. Ids written by older versions (timestamps)
    /// load as-is.
    pub fn all(settings: &dyn SettingsStore) -> ServiceResult<Vec<Widget>> {
        match settings.get(WIDGETS_KEY)? {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => Ok(Vec::new()),
        }
    }

    pub fn get(settings: &dyn SettingsStore, id: &EntityId) -> ServiceResult<Option<Widget>> {
        let mut widgets = Self::all(settings)?;
        Ok(position_of(&widgets, id).map(|index| widgets.swap_remove(index)))
    }

    /// Appends `widget` under a freshly generated id.
    pub fn add(settings: &dyn SettingsStore, mut widget: Widget) -> ServiceResult<Widget> {
        let mut widgets = Self::all(settings)?;
        widget.id = EntityId::generate();
        widgets.push(widget.clone());
        Self::save(settings, &widgets)?;
        Ok(widget)
    }

    /// Replaces the widget stored under `id`, keeping that id.
    pub fn update(
        settings: &dyn SettingsStore,
        id: &EntityId,
        mut widget: Widget,
    ) -> ServiceResult<Widget> {
        let mut widgets = Self::all(settings)?;
        let index = position_of(&widgets, id)
            .ok_or_else(|| ServiceError::Invalid("Widget not found".into()))?;
        widget.id = id.clone();
        widgets[index] = widget.clone();
        Self::save(settings, &widgets)?;
        Ok(widget)
    }

    /// Returns whether a widget was removed.
    pub fn remove(settings: &dyn SettingsStore, id: &EntityId) -> ServiceResult<bool> {
        let mut widgets = Self::all(settings)?;
        let Some(index) = position_of(&widgets, id) else {
            return Ok(false);
        };
        widgets.remove(index);
        Self::save(settings, &widgets)?;
        Ok(true)
    }

    /// Moves the widget at `from` to position `to`. Out-of-range indices
    /// leave the order untouched.
    pub fn reorder(settings: &dyn SettingsStore, from: usize, to: usize) -> ServiceResult<bool> {
        let mut widgets = Self::all(settings)?;
        if from >= widgets.len() || to >= widgets.len() {
            debug!(from, to, len = widgets.len(), "ignoring out-of-range widget move");
            return Ok(false);
        }
        let moved = widgets.remove(from);
        widgets.insert(to, moved);
        Self::save(settings, &widgets)?;
        Ok(true)
    }

    /// Value of one widget over the non-deleted records.
    pub fn calculate_value(
        records: &dyn RecordStore,
        widget: &Widget,
        ctx: &ProjectionContext,
    ) -> ServiceResult<f64> {
        let active = records.get_all(false)?;
        Ok(widget_value::calculate(widget, &active, ctx))
    }

    /// Values of every registered widget, in display order. Records are
    /// fetched once and every widget sees the same `now`.
    pub fn calculate_all(
        records: &dyn RecordStore,
        settings: &dyn SettingsStore,
        ctx: &ProjectionContext,
    ) -> ServiceResult<Vec<(Widget, f64)>> {
        let active = records.get_all(false)?;
        Ok(Self::all(settings)?
            .into_iter()
            .map(|widget| {
                let value = widget_value::calculate(&widget, &active, ctx);
                (widget, value)
            })
            .collect())
    }

    fn save(settings: &dyn SettingsStore, widgets: &[Widget]) -> ServiceResult<()> {
        settings.set(WIDGETS_KEY, serde_json::to_value(widgets)?)?;
        Ok(())
    }
}
