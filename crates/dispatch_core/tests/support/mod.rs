#![allow(dead_code)]

use dispatch_core::{Dispatcher, Driver, Point, Rider};

/// Builder for dispatchers pre-populated with drivers and riders.
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    drivers: Vec<(String, Point)>,
    riders: Vec<String>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driver(mut self, name: &str, x: f64, y: f64) -> Self {
        self.drivers.push((name.to_string(), Point::new(x, y)));
        self
    }

    pub fn rider(mut self, name: &str) -> Self {
        self.riders.push(name.to_string());
        self
    }

    /// Drivers and riders come back in the order they were added.
    pub fn build(self) -> (Dispatcher, Vec<Driver>, Vec<Rider>) {
        let dispatcher = Dispatcher::default();
        let drivers = self
            .drivers
            .into_iter()
            .map(|(name, position)| dispatcher.register_driver(name, position))
            .collect();
        let riders = self
            .riders
            .into_iter()
            .map(|name| dispatcher.register_rider(name))
            .collect();
        (dispatcher, drivers, riders)
    }
}
