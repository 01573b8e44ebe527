//! Scripted replay of scroll and selection input against a controller.
//!
//! Views record every programmatic scroll. Page views report the new offset
//! back like a real list would; the pager view replays animated scrolls as a
//! run of frames followed by momentum end.

use crate::output;
use anyhow::Context;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sharedheader_core::{PagerConfig, PagerResult, ScrollAnimation, ScrollTarget, SelectionRecord};
use sharedheader_pager::{PagerController, ScrollChannel};
use std::path::Path;
use std::sync::{Arc, Weak};
use std::time::Duration;

const DEFAULT_FRAMES: usize = 4;
/// Upper bound on chained animations (selection scroll, then snap).
const MAX_REPLAYS: usize = 4;

#[derive(Debug, Deserialize)]
pub struct Script {
    /// Replaces the loaded configuration when present.
    #[serde(default)]
    pub config: Option<PagerConfig>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// User scroll of one page's list.
    Scroll { page: usize, offset: f32 },
    /// Horizontal drag to a fractional page position, released unless `settle` is false.
    Swipe {
        to: f32,
        #[serde(default = "default_frames")]
        frames: usize,
        #[serde(default = "default_true")]
        settle: bool,
    },
    /// Momentum end without further frames.
    Settle,
    /// Programmatic selection; the resulting pager animation is played out unless `animate` is false.
    Select {
        index: usize,
        #[serde(default = "default_true")]
        animate: bool,
    },
    Wait { ms: u64 },
    Resize { width: f32 },
    Remount { page: usize },
}

fn default_frames() -> usize {
    DEFAULT_FRAMES
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PagerScroll {
    pub offset: f32,
    pub animated: bool,
}

#[derive(Default)]
struct PagerViewState {
    offset: f32,
    animating_to: Option<f32>,
    scrolls: Vec<PagerScroll>,
}

/// Horizontal page strip stand-in.
#[derive(Default)]
struct SimPagerView {
    state: Mutex<PagerViewState>,
}

impl SimPagerView {
    fn take_animation(&self) -> Option<(f32, f32)> {
        let mut state = self.state.lock();
        let target = state.animating_to.take()?;
        Some((state.offset, target))
    }

    fn set_offset(&self, offset: f32) {
        self.state.lock().offset = offset;
    }

    fn offset(&self) -> f32 {
        self.state.lock().offset
    }

    fn scrolls(&self) -> Vec<PagerScroll> {
        self.state.lock().scrolls.clone()
    }
}

impl ScrollTarget for SimPagerView {
    fn scroll_to(&self, offset: f32, animation: ScrollAnimation) {
        let mut state = self.state.lock();
        let animated = animation == ScrollAnimation::Animated;
        state.scrolls.push(PagerScroll { offset, animated });
        if animated {
            state.animating_to = Some(offset);
        } else {
            state.offset = offset;
            state.animating_to = None;
        }
    }
}

/// Vertical list stand-in for one page.
struct SimPageView {
    channel: Weak<ScrollChannel>,
    jumps: Mutex<Vec<f32>>,
}

impl SimPageView {
    fn attach(channel: &Arc<ScrollChannel>) -> PagerResult<Arc<Self>> {
        let view = Arc::new(Self {
            channel: Arc::downgrade(channel),
            jumps: Mutex::new(Vec::new()),
        });
        channel.attach_scroll_target(view.clone())?;
        Ok(view)
    }
}

impl ScrollTarget for SimPageView {
    fn scroll_to(&self, offset: f32, _animation: ScrollAnimation) {
        self.jumps.lock().push(offset);
        if let Some(channel) = self.channel.upgrade() {
            channel.report(offset);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageReport {
    pub index: usize,
    pub active: bool,
    pub scroll_offset: f32,
    pub pending_adjustment: Option<f32>,
    pub committed_adjustments: u64,
    pub jumps: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub steps: usize,
    pub selected_index: usize,
    pub header_offset: f32,
    pub current_page_offset: f32,
    pub fractional_index: f32,
    pub pager_offset: f32,
    pub page_width: f32,
    pub pages: Vec<PageReport>,
    pub selections: Vec<SelectionRecord>,
    pub on_select: Vec<usize>,
    pub pager_scrolls: Vec<PagerScroll>,
}

struct Simulation {
    controller: PagerController,
    pager_view: Arc<SimPagerView>,
    page_views: Vec<Arc<SimPageView>>,
    selects: Arc<Mutex<Vec<usize>>>,
}

impl Simulation {
    fn new(config: PagerConfig) -> anyhow::Result<Self> {
        let pager_view = Arc::new(SimPagerView::default());
        let selects = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&selects);
        let controller = PagerController::new(config, pager_view.clone(), move |index| {
            recorded.lock().push(index);
        })?;
        let page_views = controller
            .pages()
            .iter()
            .map(SimPageView::attach)
            .collect::<PagerResult<Vec<_>>>()?;
        Ok(Self {
            controller,
            pager_view,
            page_views,
            selects,
        })
    }

    async fn apply(&mut self, step: &Step) -> anyhow::Result<()> {
        match *step {
            Step::Scroll { page, offset } => {
                self.controller.page(page)?.report(offset);
            }
            Step::Swipe { to, frames, settle } => {
                let target = to * self.controller.page_width();
                self.drag(self.pager_view.offset(), target, frames);
                if settle {
                    self.settle();
                }
            }
            Step::Settle => self.settle(),
            Step::Select { index, animate } => {
                let request = self.controller.set_selected_index(index);
                tracing::debug!(index, ?request, "simulated selection");
                if animate {
                    self.play_animations();
                }
            }
            Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
            Step::Resize { width } => self.controller.resize(width)?,
            Step::Remount { page } => {
                let channel = self.controller.remount_page(page)?;
                if let Some(slot) = self.page_views.get_mut(page) {
                    *slot = SimPageView::attach(&channel)?;
                }
            }
        }
        Ok(())
    }

    fn drag(&self, from: f32, to: f32, frames: usize) {
        let frames = frames.max(1);
        for frame in 1..=frames {
            let offset = from + (to - from) * frame as f32 / frames as f32;
            self.pager_view.set_offset(offset);
            self.controller.on_pager_scroll(offset);
        }
    }

    fn settle(&self) {
        self.controller.on_momentum_end();
        self.play_animations();
    }

    /// Play out animated pager scrolls the controller issued.
    fn play_animations(&self) {
        for _ in 0..MAX_REPLAYS {
            let Some((from, to)) = self.pager_view.take_animation() else {
                return;
            };
            self.drag(from, to, DEFAULT_FRAMES);
            self.controller.on_momentum_end();
        }
    }

    fn report(&self, steps: usize) -> SimulationReport {
        let pages = self
            .controller
            .pages()
            .iter()
            .map(|channel| PageReport {
                index: channel.index(),
                active: channel.is_active(),
                scroll_offset: channel.scroll_offset(),
                pending_adjustment: channel.pending_adjustment(),
                committed_adjustments: channel.committed_adjustments(),
                jumps: self
                    .page_views
                    .get(channel.index())
                    .map(|view| view.jumps.lock().clone())
                    .unwrap_or_default(),
            })
            .collect();

        SimulationReport {
            steps,
            selected_index: self.controller.selected_index(),
            header_offset: self.controller.header_offset(),
            current_page_offset: self.controller.current_page_offset(),
            fractional_index: self.controller.fractional_index(),
            pager_offset: self.controller.pager_offset(),
            page_width: self.controller.page_width(),
            pages,
            selections: self.controller.selection_log(),
            on_select: self.selects.lock().clone(),
            pager_scrolls: self.pager_view.scrolls(),
        }
    }
}

pub fn parse_script(content: &str) -> anyhow::Result<Script> {
    serde_json::from_str(content).context("invalid simulation script")
}

pub async fn run(config: PagerConfig, script: Script) -> anyhow::Result<SimulationReport> {
    let config = script.config.unwrap_or(config);
    let mut simulation = Simulation::new(config)?;
    for (i, step) in script.steps.iter().enumerate() {
        simulation
            .apply(step)
            .await
            .with_context(|| format!("step {} ({:?}) failed", i, step))?;
    }
    // Let reaction tasks observe the final state.
    tokio::task::yield_now().await;
    Ok(simulation.report(script.steps.len()))
}

pub async fn handle(config: PagerConfig, path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let script = parse_script(&content)?;
    let report = run(config, script).await?;
    output::output_success(&report);
    Ok(())
}
