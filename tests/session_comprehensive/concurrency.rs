//! Sessions of one factory used from several threads

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use super::*;

const THREADS: usize = 4;
const PER_THREAD: usize = 100;

fn add_from_threads(factory: Arc<SessionFactory>) -> Vec<i32> {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let session = factory.open_session();
                (0..PER_THREAD)
                    .map(|i| {
                        let mut doc = TestDocument::new(0, &format!("t{}-{}", t, i));
                        session.add(&mut doc).unwrap();
                        doc.id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect()
}

#[test]
fn concurrent_auto_increment_never_repeats() {
    let factory = Arc::new(in_memory());
    let ids = add_from_threads(Arc::clone(&factory));

    let unique: HashSet<i32> = ids.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
    assert_eq!(unique, (1..=(THREADS * PER_THREAD) as i32).collect());

    let session = factory.open_session();
    assert_eq!(
        session.count::<TestDocument>().unwrap(),
        THREADS * PER_THREAD
    );
}

#[test]
fn concurrent_writes_to_persistent_store() {
    let temp = TempFactory::with(compressed);
    let dir = temp.dir;
    let factory = Arc::new(temp.factory);

    let ids = add_from_threads(Arc::clone(&factory));
    assert_eq!(ids.len(), THREADS * PER_THREAD);

    let factory = Arc::try_unwrap(factory).unwrap();
    factory.close().unwrap();

    let reopened =
        SessionFactory::open(compressed(SessionFactoryConfig::new().store_at(dir.path()))).unwrap();
    assert_eq!(
        reopened.open_session().count::<TestDocument>().unwrap(),
        THREADS * PER_THREAD
    );
}

#[test]
fn session_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<doclite::Session>();
    assert_send::<SessionFactory>();
}
