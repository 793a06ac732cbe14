use std::time::Duration;

use futures::FutureExt;
use pagewise::{BoxError, ItemsPage, LoadOutcome, LoadState, Loader, LoaderOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> pagewise::Result<()> {
    // Simulate a viewport collaborator over a 25-row dataset, 10 per page.
    let total = 25usize;
    let options = LoaderOptions::new(move |request, _scope| {
        let take = request.requested_count.unwrap_or(10);
        let end = request.start_index.saturating_add(take).min(total);
        let items: Vec<String> = (request.start_index..end).map(|i| format!("row {i}")).collect();
        async move {
            // Stand-in for a network hop.
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, BoxError>(ItemsPage::new(items, total))
        }
        .boxed()
    })
    .with_page_size(Some(10))
    .with_on_change(Some(|state: &LoadState| {
        println!(
            "state: loaded={} fetching={} completed={}",
            state.loaded, state.fetching, state.completed
        );
    }))
    .with_on_items_available(Some(|state: &LoadState| {
        println!("advisory: {} rows available, viewport may re-evaluate", state.loaded);
    }));

    let loader = Loader::new(options);

    // The collaborator keeps signalling while its (simulated) viewport shows
    // fewer rows than it can hold.
    let viewport_rows = 18;
    while !loader.is_completed() && loader.len() < viewport_rows {
        match loader.request_more().await? {
            LoadOutcome::Loaded {
                appended,
                completed,
            } => println!("page applied: appended={appended} completed={completed}"),
            other => println!("signal ignored: {other:?}"),
        }
    }

    println!(
        "viewport filled with {} of {:?} rows",
        loader.len(),
        loader.total_count()
    );

    // Switching the data source restarts the sequence from offset 0.
    loader.reset();
    loader.request_more().await?;
    println!("after reset: {} rows", loader.len());

    loader.dispose();
    Ok(())
}
