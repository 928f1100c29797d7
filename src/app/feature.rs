//! PlotFeature: Laufzeit-Instanz eines Plots (Schema + Samples + Render-Objekte).

use std::cell::RefCell;
use std::rc::Rc;

use super::completion::{CompletionSender, PlotCompletion, PlotOutcome};
use super::scheme::{PlotRender, PlotScheme, SchemeRegistry};
use super::PlotError;
use crate::core::{
    CollectionKind, GraphicCollection, GraphicHandle, GraphicId, GraphicTag, ListenerId, Packable,
    PlotId, SampleInterpolation, SampledProperty, ScopeError, ScopedCollection, Viewer,
};
use crate::shared::diff::list_diff;

/// Warteschlange der Plots, deren Samples sich geändert haben.
pub(crate) type InvalidationQueue = Rc<RefCell<Vec<PlotId>>>;

/// Lebenszyklus eines Plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotLifecycle {
    /// Erstellt, noch nicht vom Controller übernommen
    #[default]
    Created,
    /// Wird interaktiv definiert
    Defining,
    /// Definition abgeschlossen (editierbar, aber nie wieder `Defining`)
    Committed,
}

/// Parameter für einen neuen Plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFeatureOptions {
    /// Schema-Kennung (z.B. `"polygon"`)
    pub scheme: String,
    /// Start-Samples
    pub samples: Vec<Packable>,
    /// Interpolation, `None` = Standard aus den Optionen
    pub interpolation: Option<SampleInterpolation>,
    /// Interaktiv definieren (`true`) oder direkt übernehmen
    pub defining: bool,
}

impl PlotFeatureOptions {
    /// Neuer, interaktiv zu definierender Plot.
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            samples: Vec::new(),
            interpolation: None,
            defining: true,
        }
    }

    /// Setzt Start-Samples.
    pub fn with_samples(mut self, samples: Vec<Packable>) -> Self {
        self.samples = samples;
        self
    }

    /// Setzt die Interpolation.
    pub fn with_interpolation(mut self, interpolation: SampleInterpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    /// Plot ohne Definitionsphase übernehmen.
    pub fn committed(mut self) -> Self {
        self.defining = false;
        self
    }
}

/// Ein Plot mit seinen Render-Scopes.
///
/// Die Render-Objekte liegen in den Scene-Collections des Viewers; der Plot
/// trackt sie über drei `ScopedCollection`s und trägt sie beim Drop aus.
#[derive(Debug)]
pub struct PlotFeature {
    id: PlotId,
    scheme: Rc<dyn PlotScheme>,
    sampled: SampledProperty,
    lifecycle: PlotLifecycle,
    active: bool,
    rendered: PlotRender,
    entities: ScopedCollection<GraphicCollection>,
    primitives: ScopedCollection<GraphicCollection>,
    ground_primitives: ScopedCollection<GraphicCollection>,
    sender: Option<CompletionSender>,
    completion: PlotCompletion,
    listener: Option<ListenerId>,
}

impl PlotFeature {
    /// Erstellt einen Plot im Zustand `Created`.
    pub fn new(
        scheme: Rc<dyn PlotScheme>,
        samples: Vec<Packable>,
        interpolation: SampleInterpolation,
    ) -> Self {
        let id = PlotId::next();
        let (sender, completion) = CompletionSender::channel(id);
        Self {
            id,
            scheme,
            sampled: SampledProperty::with_samples(interpolation, samples),
            lifecycle: PlotLifecycle::Created,
            active: false,
            rendered: PlotRender::default(),
            entities: ScopedCollection::unbound(CollectionKind::Entities.label()),
            primitives: ScopedCollection::unbound(CollectionKind::Primitives.label()),
            ground_primitives: ScopedCollection::unbound(CollectionKind::GroundPrimitives.label()),
            sender: Some(sender),
            completion,
            listener: None,
        }
    }

    /// Erstellt einen Plot aus Optionen über die Schema-Registry.
    pub fn from_options(
        options: &PlotFeatureOptions,
        schemes: &SchemeRegistry,
        default_interpolation: SampleInterpolation,
    ) -> Result<Self, PlotError> {
        let scheme = schemes
            .get(&options.scheme)
            .ok_or_else(|| PlotError::UnknownScheme(options.scheme.clone()))?;
        Ok(Self::new(
            scheme,
            options.samples.clone(),
            options.interpolation.unwrap_or(default_interpolation),
        ))
    }

    /// Identität.
    pub fn id(&self) -> PlotId {
        self.id
    }

    /// Geteiltes Schema.
    pub fn scheme(&self) -> Rc<dyn PlotScheme> {
        self.scheme.clone()
    }

    /// Schema-Kennung.
    pub fn kind(&self) -> &str {
        self.scheme.kind()
    }

    /// Sample-Property (read-only).
    pub fn sampled(&self) -> &SampledProperty {
        &self.sampled
    }

    /// Sample-Property. Änderungen lösen einen Re-Render aus.
    pub fn sampled_mut(&mut self) -> &mut SampledProperty {
        &mut self.sampled
    }

    /// Snapshot zum Zeitpunkt.
    pub fn value_at(&self, time: f64) -> Packable {
        self.sampled.get_value(time)
    }

    /// Lebenszyklus.
    pub fn lifecycle(&self) -> PlotLifecycle {
        self.lifecycle
    }

    /// Wird der Plot gerade definiert?
    pub fn is_defining(&self) -> bool {
        self.lifecycle == PlotLifecycle::Defining
    }

    /// Ist der Plot der aktuelle?
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Render-Objekte des letzten Durchlaufs.
    pub fn rendered(&self) -> &PlotRender {
        &self.rendered
    }

    /// Abschluss-Future dieses Plots.
    pub fn completion(&self) -> PlotCompletion {
        self.completion.clone()
    }

    /// Anzahl getrackter Objekte in einer Collection.
    pub fn tracked(&self, kind: CollectionKind) -> usize {
        self.scope(kind).len()
    }

    /// Gehört das Objekt zu diesem Plot (in einer der drei Collections)?
    pub fn owns_graphic(&self, id: GraphicId) -> bool {
        CollectionKind::ALL
            .iter()
            .any(|kind| self.scope(*kind).contains(id))
    }

    fn scope(&self, kind: CollectionKind) -> &ScopedCollection<GraphicCollection> {
        match kind {
            CollectionKind::Entities => &self.entities,
            CollectionKind::Primitives => &self.primitives,
            CollectionKind::GroundPrimitives => &self.ground_primitives,
        }
    }

    fn scope_mut(&mut self, kind: CollectionKind) -> &mut ScopedCollection<GraphicCollection> {
        match kind {
            CollectionKind::Entities => &mut self.entities,
            CollectionKind::Primitives => &mut self.primitives,
            CollectionKind::GroundPrimitives => &mut self.ground_primitives,
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// `Created → Defining`. Gibt `true` zurück wenn übergegangen.
    pub(crate) fn begin_defining(&mut self) -> bool {
        if self.lifecycle != PlotLifecycle::Created {
            return false;
        }
        self.lifecycle = PlotLifecycle::Defining;
        log::info!("{}: Definition gestartet ({})", self.id, self.kind());
        true
    }

    /// `Created|Defining → Committed`, löst die Completion auf.
    pub(crate) fn commit(&mut self) -> bool {
        if self.lifecycle == PlotLifecycle::Committed {
            return false;
        }
        self.lifecycle = PlotLifecycle::Committed;
        log::info!(
            "{}: übernommen mit {} Sample(s)",
            self.id,
            self.sampled.len()
        );
        self.resolve(PlotOutcome::Committed(self.id));
        true
    }

    /// Löst die Completion auf (nur das erste Ergebnis zählt).
    pub(crate) fn resolve(&mut self, outcome: PlotOutcome) {
        if let Some(sender) = self.sender.take() {
            sender.resolve(outcome);
        }
    }

    /// Bindet die Render-Scopes an die Collections des Viewers.
    pub(crate) fn bind(&mut self, viewer: &dyn Viewer) {
        for kind in CollectionKind::ALL {
            if let Some(collection) = viewer.collection(kind) {
                self.scope_mut(kind).bind(&collection);
            }
        }
    }

    /// Meldet Sample-Änderungen an die Invalidierungs-Warteschlange.
    pub(crate) fn listen(&mut self, queue: &InvalidationQueue) {
        self.unlisten();
        let id = self.id;
        let queue = queue.clone();
        self.listener = Some(
            self.sampled
                .definition_changed()
                .subscribe(move |_| queue.borrow_mut().push(id)),
        );
    }

    pub(crate) fn unlisten(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.sampled.definition_changed().unsubscribe(listener);
        }
    }

    /// Übernimmt ein Render-Ergebnis in die Scene.
    ///
    /// Neue Objekte werden eingefügt, nicht mehr gelieferte zerstört. Ist eine
    /// benötigte Collection nicht gebunden oder ausgeliehen, bleibt alles
    /// unverändert.
    pub(crate) fn apply_render(&mut self, next: PlotRender) -> Result<(), ScopeError> {
        for kind in CollectionKind::ALL {
            if !next.get(kind).is_empty() {
                self.scope(kind).writable()?;
            }
        }

        let tag = GraphicTag::Plot(self.id);
        for handle in next.iter() {
            handle.borrow_mut().tag = tag;
        }

        for kind in CollectionKind::ALL {
            let diff = list_diff(next.get(kind), self.rendered.get(kind), GraphicHandle::id);
            let scope = self.scope_mut(kind);
            for handle in diff.added {
                scope.add(handle)?;
            }
            for handle in diff.removed {
                scope.remove(handle.id(), true);
            }
        }
        self.rendered = next;
        Ok(())
    }

    /// Trägt alle Render-Objekte aus und zerstört sie.
    pub(crate) fn release_graphics(&mut self) -> usize {
        self.rendered = PlotRender::default();
        CollectionKind::ALL
            .iter()
            .map(|kind| self.scope_mut(*kind).remove_scope(true))
            .sum()
    }

    /// Entfernt den Plot endgültig: Scene aufräumen, Completion auflösen.
    pub(crate) fn dispose(mut self, outcome: PlotOutcome) {
        self.unlisten();
        let released = self.release_graphics();
        log::info!("{}: entfernt ({:?}, {} Objekt(e))", self.id, outcome, released);
        self.resolve(outcome);
    }
}
