//! Live chart instances
//!
//! Drawing a chart always destroys the previous instance on the same
//! canvas first; there is no incremental update path.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use super::{ChartId, ChartSpec};

/// The charting engine that owns drawn instances
pub trait ChartEngine {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Chart id to owned handle. Lives in the render context, never in a global.
pub struct ChartRegistry<E: ChartEngine> {
    engine: E,
    live: BTreeMap<ChartId, E::Handle>,
}

impl<E: ChartEngine> ChartRegistry<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            live: BTreeMap::new(),
        }
    }

    /// Destroy whatever is drawn on `spec.id`, then draw `spec`
    pub fn render(&mut self, spec: &ChartSpec) -> &E::Handle {
        if let Some(previous) = self.live.remove(&spec.id) {
            self.engine.destroy(previous);
        }
        let handle = self.engine.create(spec);
        self.live.entry(spec.id).or_insert(handle)
    }

    pub fn contains(&self, id: ChartId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

/// Handle to one chart drawn on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHandle {
    pub id: ChartId,
    pub instance: Uuid,
}

/// A chart the page bridge will mount on load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountedChart {
    pub instance: Uuid,
    #[serde(flatten)]
    pub spec: ChartSpec,
}

/// Engine that collects charts for the served page, in draw order
#[derive(Debug, Default)]
pub struct PageCharts {
    mounted: Vec<MountedChart>,
}

impl PageCharts {
    pub fn mounted(&self) -> &[MountedChart] {
        &self.mounted
    }
}

impl ChartEngine for PageCharts {
    type Handle = ChartHandle;

    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle {
            id: spec.id,
            instance: Uuid::new_v4(),
        };
        self.mounted.push(MountedChart {
            instance: handle.instance,
            spec: spec.clone(),
        });
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.mounted.retain(|chart| chart.instance != handle.instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartKind, ValueFormat, build_chart_spec, build_theme_options};
    use crate::theme::ThemeMode;

    #[derive(Default)]
    struct RecordingEngine {
        next: u32,
        created: Vec<(ChartId, u32)>,
        destroyed: Vec<(ChartId, u32)>,
    }

    impl ChartEngine for RecordingEngine {
        type Handle = (ChartId, u32);

        fn create(&mut self, spec: &ChartSpec) -> Self::Handle {
            self.next += 1;
            self.created.push((spec.id, self.next));
            (spec.id, self.next)
        }

        fn destroy(&mut self, handle: Self::Handle) {
            self.destroyed.push(handle);
        }
    }

    fn spec(id: ChartId, mode: ThemeMode) -> ChartSpec {
        let data = ChartData::new(vec!["a".into()], vec![1.0], ValueFormat::Usd);
        build_chart_spec(id, ChartKind::Line, &data, &build_theme_options(mode))
    }

    #[test]
    fn test_render_destroys_previous_instance() {
        let mut registry = ChartRegistry::new(RecordingEngine::default());

        registry.render(&spec(ChartId::Price, ThemeMode::Light));
        registry.render(&spec(ChartId::Volume, ThemeMode::Light));
        let handle = *registry.render(&spec(ChartId::Price, ThemeMode::Dark));

        assert_eq!(handle, (ChartId::Price, 3));
        assert_eq!(registry.engine().created.len(), 3);
        assert_eq!(registry.engine().destroyed, vec![(ChartId::Price, 1)]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_page_charts_keep_only_latest_instance() {
        let mut registry = ChartRegistry::new(PageCharts::default());
        let first = *registry.render(&spec(ChartId::Price, ThemeMode::Light));
        let second = *registry.render(&spec(ChartId::Price, ThemeMode::Dark));

        assert_ne!(first.instance, second.instance);
        let mounted = registry.engine().mounted();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].instance, second.instance);
        assert_eq!(
            mounted[0].spec.config["options"]["scales"]["x"]["ticks"]["color"],
            "#E5E7EB"
        );
        assert!(registry.contains(ChartId::Price));
    }
}
