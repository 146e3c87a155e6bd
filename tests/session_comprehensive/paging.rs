//! Positional paging over the whole store
//!
//! Pages count every key in the store, whatever its type. Entries of other
//! document names inside the window are skipped. Most documents here use
//! manual ids so that positions are easy to read; the cross-type tests at the
//! end mix in counters and other types.

use super::*;
use doclite::Error;

const TOTAL: i32 = 100;

fn filled(factory: &SessionFactory) {
    let session = factory.open_session();
    for id in 1..=TOTAL {
        session.add(&mut TestDocument::new(id, "paged")).unwrap();
    }
}

fn ids(page: &[TestDocument]) -> Vec<i32> {
    page.iter().map(|d| d.id).collect()
}

#[test]
fn first_page() {
    let factory = in_memory();
    filled(&factory);
    let session = factory.open_session();

    let page = session.get_page::<TestDocument>(0, 10).unwrap();
    assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
}

#[test]
fn middle_page() {
    let factory = in_memory();
    filled(&factory);
    let session = factory.open_session();

    let page = session.get_page::<TestDocument>(40, 5).unwrap();
    assert_eq!(ids(&page), vec![41, 42, 43, 44, 45]);
}

#[test]
fn last_full_page_is_allowed() {
    let factory = in_memory();
    filled(&factory);
    let session = factory.open_session();

    let page = session
        .get_page::<TestDocument>(TOTAL as usize - 10, 10)
        .unwrap();
    assert_eq!(ids(&page), (91..=100).collect::<Vec<_>>());
}

#[test]
fn page_past_the_end_is_out_of_range() {
    let factory = in_memory();
    filled(&factory);
    let session = factory.open_session();

    let result = session.get_page::<TestDocument>(TOTAL as usize - 10, 11);
    assert!(matches!(
        result,
        Err(Error::OutOfRange {
            skip: 90,
            take: 11,
            count: 100
        })
    ));
}

#[test]
fn zero_take_is_empty() {
    let factory = in_memory();
    filled(&factory);
    let session = factory.open_session();

    assert!(session.get_page::<TestDocument>(100, 0).unwrap().is_empty());
}

#[test]
fn pages_cover_the_raw_store() {
    let factory = in_memory();
    let session = factory.open_session();

    // "Bill-00001" sorts before every "TestDocument-…" key
    session.add(&mut Invoice { id: 1, total: 5 }).unwrap();
    session.add(&mut TestDocument::new(1, "a")).unwrap();
    session.add(&mut TestDocument::new(2, "b")).unwrap();

    // Three keys in the store, two of them TestDocument
    assert!(matches!(
        session.get_page::<TestDocument>(0, 4),
        Err(Error::OutOfRange { count: 3, .. })
    ));

    // The invoice occupies position 0 and is skipped
    let page = session.get_page::<TestDocument>(0, 3).unwrap();
    assert_eq!(ids(&page), vec![1, 2]);

    let invoices = session.get_page::<Invoice>(0, 3).unwrap();
    assert_eq!(invoices, vec![Invoice { id: 1, total: 5 }]);
}

#[test]
fn last_page_with_counter_record() {
    let factory = in_memory();
    let session = factory.open_session();

    // "Bill-…" keys sort before their "NextAutoId-Bill" counter
    for _ in 0..20 {
        session.add(&mut Invoice { id: 0, total: 1 }).unwrap();
    }
    let count = 21;

    let page = session.get_page::<Invoice>(count - 10, 10).unwrap();
    let issued: Vec<i16> = page.iter().map(|i| i.id).collect();
    assert_eq!(issued, (12..=20).collect::<Vec<_>>());

    // A window holding only the counter is empty, not an error
    assert!(session.get_page::<Invoice>(count - 1, 1).unwrap().is_empty());
    assert!(matches!(
        session.get_page::<Invoice>(count - 10, 11),
        Err(Error::OutOfRange { count: 21, .. })
    ));
}

#[test]
fn auto_id_documents_after_their_counter() {
    for_each_factory(|name, factory| {
        let session = factory.open_session();
        for _ in 0..10 {
            session.add(&mut TestDocument::new(0, "auto")).unwrap();
        }

        // "NextAutoId-TestDocument" is position 0
        let page = session.get_page::<TestDocument>(0, 11).unwrap();
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>(), "{}", name);

        let last = session.get_page::<TestDocument>(1, 10).unwrap();
        assert_eq!(ids(&last), (1..=10).collect::<Vec<_>>(), "{}", name);
    });
}

#[test]
fn paging_is_identical_across_pipelines() {
    for_each_factory(|name, factory| {
        let session = factory.open_session();
        for id in 1..=20 {
            session.add(&mut TestDocument::new(id, "paged")).unwrap();
        }

        let page = session.get_page::<TestDocument>(15, 5).unwrap();
        assert_eq!(ids(&page), vec![16, 17, 18, 19, 20], "{}", name);
    });
}
