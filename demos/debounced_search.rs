use std::sync::Arc;
use std::time::Duration;

use pagewise::Debouncer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Simulate search-as-you-type: a burst of keystrokes arrives faster than
    // the debounce delay, so only the last query runs.
    let debouncer = Arc::new(Debouncer::new());

    let mut pending = Vec::new();
    for query in ["r", "ru", "rus", "rust"] {
        let debouncer = Arc::clone(&debouncer);
        pending.push(tokio::spawn(async move {
            debouncer
                .debounce(Duration::from_millis(150), move |_scope| async move {
                    println!("querying for {query:?}");
                })
                .await;
        }));
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    for task in pending {
        task.await.expect("debounce task panicked");
    }

    // A result-returning variant: the superseded call yields the default.
    let (abandoned, kept) = tokio::join!(
        debouncer.debounce_for_result(Duration::from_millis(50), |_scope| async {
            String::from("stale suggestion")
        }),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            debouncer
                .debounce_for_result(Duration::from_millis(50), |_scope| async {
                    String::from("fresh suggestion")
                })
                .await
        },
    );
    println!("abandoned={abandoned:?} kept={kept:?}");

    debouncer.dispose();
}
