//! Many clients holding the same ETag race to write.
//!
//! Exactly one wins; every other client gets 412 and the final content is
//! the winner's. Every 200 response pairs its body with that body's ETag,
//! however writes interleave.

use crate::common::*;
use http::StatusCode;
use occgate::{Document, Fingerprint, ResourceStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_same_etag_single_winner() {
    const CLIENTS: usize = 16;
    let endpoint = Arc::new(endpoint("hello"));
    let token = etag(&endpoint.handle(&get(DOC)));
    let barrier = Arc::new(Barrier::new(CLIENTS));

    let handles: Vec<_> = (0..CLIENTS)
        .map(|i| {
            let endpoint = Arc::clone(&endpoint);
            let barrier = Arc::clone(&barrier);
            let token = token.clone();
            thread::spawn(move || {
                barrier.wait();
                let body = format!("client-{}", i);
                let response = endpoint.handle(&put(DOC, Some(&token), &body));
                (body, response.status(), etag_if_ok(&response))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<_> = results
        .iter()
        .filter(|(_, status, _)| *status == StatusCode::OK)
        .collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .all(|(_, status, _)| *status == StatusCode::OK || *status == StatusCode::PRECONDITION_FAILED));

    let (body, _, new_etag) = winners[0];
    assert_eq!(&stored_text(&endpoint), body);
    assert_eq!(new_etag.as_deref(), Some(Fingerprint::of(body.as_bytes()).as_str()));
    assert_eq!(endpoint.store().write_count(), 1);
}

/// Clients that retry on 412 by re-reading all land their writes.
///
/// Each client increments the counter it read, so a lost update would show
/// up as a final count below the number of clients.
#[test]
fn test_retry_on_412_converges() {
    const CLIENTS: usize = 8;
    let endpoint = Arc::new(endpoint("0"));

    let handles: Vec<_> = (0..CLIENTS)
        .map(|_| {
            let endpoint = Arc::clone(&endpoint);
            thread::spawn(move || loop {
                let current = endpoint.handle(&get(DOC));
                assert_paired(&current);
                let n: u64 = text(&current).parse().unwrap();
                let response = endpoint.handle(&put(DOC, Some(&etag(&current)), &(n + 1).to_string()));
                match response.status() {
                    StatusCode::OK => {
                        assert_paired(&response);
                        break;
                    }
                    StatusCode::PRECONDITION_FAILED => continue,
                    other => panic!("unexpected status {}", other),
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(stored_text(&endpoint), CLIENTS.to_string());
}

fn etag_if_ok(response: &http::Response<Vec<u8>>) -> Option<String> {
    (response.status() == StatusCode::OK).then(|| etag(response))
}

/// Reads racing a writer that bypasses the guard still pair body and ETag.
#[test]
fn test_reads_pair_body_and_etag_under_writes() {
    const READERS: usize = 4;
    const READS: usize = 2_000;
    let endpoint = Arc::new(endpoint("a"));
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let endpoint = Arc::clone(&endpoint);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut flip = false;
            while !stop.load(Ordering::Acquire) {
                let text = if flip { "a" } else { "b" };
                endpoint.store().write(&DOC, Document::new(text)).unwrap();
                flip = !flip;
            }
        })
    };

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let endpoint = Arc::clone(&endpoint);
            thread::spawn(move || {
                for _ in 0..READS {
                    assert_paired(&endpoint.handle(&get(DOC)));
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().unwrap();
    }
    stop.store(true, Ordering::Release);
    writer.join().unwrap();
}

/// ETag of a 200 response is the fingerprint of its body.
fn assert_paired(response: &http::Response<Vec<u8>>) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        etag(response),
        Fingerprint::of(text(response).as_bytes()).as_str(),
        "ETag does not describe the body it came with"
    );
}
