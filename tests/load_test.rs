//! Load testing for the reverse proxy.

use std::time::{Duration, Instant};

use tcp_reverse_proxy::config::Strategy;

mod common;

use common::REQUEST;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_load_performance() {
    // 1. Setup Mock Backends
    let (b1, _) = common::start_mock_backend(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello").await;
    let (b2, _) = common::start_mock_backend(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello").await;

    // 2. Start Proxy
    let mut config = common::config_for(&[b1, b2]);
    config.load_balancing.strategy = Strategy::Random;
    config.timeouts.read_ms = Some(5_000);
    let (proxy, shutdown) = common::start_proxy(config).await;

    // 3. Run Load Test
    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let start = Instant::now();
    let mut tasks = Vec::new();

    for _ in 0..concurrency {
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::with_capacity(requests_per_task);
            for _ in 0..requests_per_task {
                let req_start = Instant::now();
                let response = common::send_raw(proxy, REQUEST).await;
                if response.ends_with(b"hello") {
                    latencies.push(req_start.elapsed());
                }
            }
            latencies
        }));
    }

    let mut all_latencies: Vec<Duration> = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }

    let duration = start.elapsed();
    let rps = total_requests as f64 / duration.as_secs_f64();

    assert_eq!(all_latencies.len(), total_requests, "every request should succeed");

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", rps);
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");

    shutdown.trigger();
}
