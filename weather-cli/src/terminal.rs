use std::io::Write;

use weather_core::{
    LocatorView, Render, Status, UiState, ViewModel,
    view::ids,
};

/// Prints each page state as it is reached.
pub struct Terminal<W: Write> {
    out: W,
}

impl Terminal<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> Terminal<W> {
    #[cfg(test)]
    fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

/// Lines for a results page state; empty when nothing is visible.
pub fn format_state(state: &UiState) -> Vec<String> {
    let vm = ViewModel::from(state);
    let slot = |id: &str| vm.slot(id).unwrap_or_default();

    if vm.regions.loading {
        vec!["Loading weather data...".to_string()]
    } else if vm.regions.results {
        vec![
            slot(ids::CITY_NAME).to_string(),
            format!("  Temperature: {}", slot(ids::TEMPERATURE)),
            format!("  Conditions:  {}", slot(ids::DESCRIPTION)),
            format!("  Feels like:  {}", slot(ids::FEELS_LIKE)),
            format!("  Humidity:    {}", slot(ids::HUMIDITY)),
            format!("  Wind speed:  {}", slot(ids::WIND_SPEED)),
        ]
    } else if vm.regions.error {
        vec![format!("Error: {}", slot(ids::ERROR_TEXT))]
    } else {
        Vec::new()
    }
}

impl<W: Write> Render<UiState> for Terminal<W> {
    fn render(&mut self, state: &UiState) {
        for line in format_state(state) {
            self.line(&line);
        }
    }
}

impl<W: Write> Render<LocatorView> for Terminal<W> {
    fn render(&mut self, view: &LocatorView) {
        match &view.status {
            Some(Status::Progress(text)) => self.line(text),
            Some(Status::Error(text)) => self.line(&format!("Error: {text}")),
            None => {}
        }
    }
}
