mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use dispatch_core::{Dispatcher, Point, RideStatus};

use support::DispatcherBuilder;

#[test]
fn concurrent_requests_never_share_a_driver() {
    let mut builder = DispatcherBuilder::new();
    for i in 0..8 {
        builder = builder.driver(&format!("driver-{i}"), i as f64, 0.0);
    }
    for i in 0..16 {
        builder = builder.rider(&format!("rider-{i}"));
    }
    let (dispatcher, _, riders) = builder.build();
    let dispatcher: Arc<Dispatcher> = Arc::new(dispatcher);

    let handles: Vec<_> = riders
        .into_iter()
        .map(|rider| {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || {
                dispatcher
                    .request_ride(&rider.id, Point::new(3.5, 0.0), Point::default())
                    .expect("request")
            })
        })
        .collect();

    let requests: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread"))
        .collect();

    let assigned: Vec<_> = requests
        .iter()
        .filter_map(|request| request.assigned_driver_id().cloned())
        .collect();
    let unique: HashSet<_> = assigned.iter().cloned().collect();

    assert_eq!(assigned.len(), 8);
    assert_eq!(unique.len(), 8, "a driver was assigned twice");
    assert_eq!(
        requests
            .iter()
            .filter(|request| request.status() == RideStatus::Unassignable)
            .count(),
        8
    );
    assert!(dispatcher.available_drivers().is_empty());
}

#[test]
fn cancel_racing_assignment_leaves_consistent_state() {
    let (dispatcher, drivers, riders) = DispatcherBuilder::new()
        .driver("D", 0.0, 0.0)
        .rider("rider")
        .build();
    let dispatcher = Arc::new(dispatcher);
    let request = dispatcher
        .request_ride(&riders[0].id, Point::default(), Point::default())
        .expect("request");

    let canceller = {
        let dispatcher = Arc::clone(&dispatcher);
        let id = request.id.clone();
        thread::spawn(move || dispatcher.cancel_ride(&id))
    };
    let completer = {
        let dispatcher = Arc::clone(&dispatcher);
        let id = request.id.clone();
        thread::spawn(move || dispatcher.complete_ride(&id))
    };

    let cancelled = canceller.join().expect("cancel thread");
    let completed = completer.join().expect("complete thread");

    // Exactly one of the two transitions wins.
    assert!(cancelled.is_ok() ^ completed.is_ok());
    let final_request = dispatcher.ride(&request.id).expect("ride");
    assert!(final_request.status().is_terminal());
    assert!(final_request.assigned_driver_id().is_none());
    assert!(dispatcher.driver(&drivers[0].id).expect("driver").is_available());
}
