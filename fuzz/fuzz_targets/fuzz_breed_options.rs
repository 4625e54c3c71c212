#![no_main]

use breedcheck::akc::api::{filter_placeholder, is_placeholder, parse_breed_options};
use breedcheck::akc::AkcBreedCheck;
use breedcheck::Page;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every check must return a result for arbitrary bytes, never panic
    let group = AkcBreedCheck::from_page(Page::new("http://fuzz/", 200, data));
    let results = group.run();
    assert_eq!(results.len(), breedcheck::akc::CHECKS.len());

    let html = String::from_utf8_lossy(data);
    if let Ok(options) = parse_breed_options(&html) {
        let filtered = filter_placeholder(&options);

        // Filtering only ever removes the prompt
        assert!(filtered.len() <= options.len());
        assert!(!filtered.iter().any(|t| is_placeholder(t)));
        assert_eq!(
            options.len() - filtered.len(),
            options.iter().filter(|o| o.is_placeholder()).count()
        );
    }
});
