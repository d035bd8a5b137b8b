//! Example demonstrating error handling with the nearest-neighbor search.
//!
//! Each failure mode of `NeighborSearch` is reported as a `KnnError` value
//! instead of a panic.

use k_nn::{KNearestNeighbors, KnnError, NeighborSearch};
use ndarray::{Array2, array};

fn main() {
    println!("Nearest-Neighbor Search Error Handling Examples");
    println!("===============================================");

    // Example 1: Fitting on an empty reference set
    println!("\n1. Fitting on an empty reference set:");
    let mut search: KNearestNeighbors<f64> = KNearestNeighbors::default();
    match search.fit(Array2::<f64>::zeros((0, 2)).view()) {
        Ok(()) => println!("   Search fitted"),
        Err(KnnError::EmptyTrainingSet) => {
            println!("   ✓ Caught expected error: {}", KnnError::EmptyTrainingSet)
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Querying before fitting
    println!("\n2. Querying before fitting:");
    match search.kneighbors(array![[1.0, 1.0]].view(), 1) {
        Ok(_) => println!("   Query succeeded"),
        Err(e) => println!("   ✓ Caught expected error: {}", e),
    }

    // Example 3: Asking for more neighbors than exist
    println!("\n3. Requesting more neighbors than reference points:");
    let reference = array![[1.0, 1.0], [2.0, 2.0], [1.0, 2.0]];
    if let Err(e) = search.fit(reference.view()) {
        println!("   ✗ Failed to fit: {}", e);
        return;
    }
    match search.kneighbors(reference.view(), 4) {
        Ok(_) => println!("   Query succeeded"),
        Err(e @ KnnError::KTooLarge { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 4: Successful query, self matches included
    println!("\n4. Successful self query with k = 2:");
    match search.kneighbors(reference.view(), 2) {
        Ok(distances) => {
            for (i, row) in distances.rows().into_iter().enumerate() {
                println!("   point {} -> {:?}", i, row.to_vec());
            }
        }
        Err(e) => println!("   ✗ Query failed: {}", e),
    }

    // Example 5: Error propagation in a function
    println!("\n5. Error propagation in functions:");

    fn nearest_radius() -> Result<f64, KnnError> {
        let mut search: KNearestNeighbors<f64> = KNearestNeighbors::default();
        search.fit(array![[1.0], [-1.0]].view())?;
        let distances = search.kneighbors(array![[0.5]].view(), 1)?;
        Ok(distances[[0, 0]])
    }

    match nearest_radius() {
        Ok(radius) => println!("   ✓ Nearest radius: {}", radius),
        Err(e) => println!("   ✗ Search failed: {}", e),
    }

    println!("\nAll examples completed successfully!");
}
