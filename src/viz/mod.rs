use std::{
    collections::VecDeque,
    sync::{mpsc::Receiver, Arc, Mutex},
    thread,
};

use eframe::CreationContext;
use egui::plot::{Line, Plot};

use crate::matrix::Vector;

/// State sent to the GUI renderer on each logged iteration of training
/// (iteration, error, outputs of the last sample)
pub type IterationState = (usize, f64, Vector<f64>);

/// Any type that can be rendered and updated during training
pub trait Visualizer: eframe::App + 'static {
    const DATA_LIMIT: usize = 20_000;
    fn new(cc: &CreationContext, rx: Receiver<IterationState>) -> Self;
}

/// Default gui that plots the error while training
pub struct ErrorPlot {
    data: Arc<Mutex<VecDeque<IterationState>>>,
}

/// Appends `state`, dropping the oldest entries so at most `limit` remain.
fn push_bounded(data: &mut VecDeque<IterationState>, state: IterationState, limit: usize) {
    while data.len() >= limit && !data.is_empty() {
        data.pop_front();
    }
    data.push_back(state);
}

/// Drains `rx` into `data` until every sender is gone, calling `on_update` after each push.
fn drain_into(
    rx: Receiver<IterationState>,
    data: &Mutex<VecDeque<IterationState>>,
    limit: usize,
    mut on_update: impl FnMut(),
) {
    for state in rx {
        match data.lock() {
            Ok(mut data) => push_bounded(&mut data, state, limit),
            Err(_) => return,
        }
        on_update();
    }
}

impl Visualizer for ErrorPlot {
    /// Initialize ErrorPlot, but also start a thread that listens to a receiver and updates the state
    fn new(cc: &CreationContext, rx: Receiver<IterationState>) -> Self {
        let data = Arc::new(Mutex::new(VecDeque::new()));
        let data_clone = data.clone();

        let ctx = cc.egui_ctx.clone();
        thread::spawn(move || {
            drain_into(rx, &data_clone, Self::DATA_LIMIT, || ctx.request_repaint())
        });

        Self { data }
    }
}

impl eframe::App for ErrorPlot {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let data: Vec<_> = self
            .get_data()
            .into_iter()
            .map(|(i, err, _)| [i as f64, err])
            .collect();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                let [i, err] = data.last().unwrap_or(&[0.0, f64::INFINITY]);
                ui.heading(format!("Iteration {} error: {err}", *i as usize));
                Plot::new("Error").show(ui, |plot_ui| plot_ui.line(Line::new(data)));
            });
        });
    }
}

impl ErrorPlot {
    /// Returns a clone of the data as a vec
    /// Blocks until it can get a lock on its state data
    pub fn get_data(&self) -> Vec<IterationState> {
        match self.data.lock() {
            Ok(data) => data.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}
