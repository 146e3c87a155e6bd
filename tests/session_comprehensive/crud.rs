//! Add, get, remove and overwrite across every store and pipeline

use super::*;
use doclite::{OrderedStore, PersistentStore};

#[test]
fn single_document_roundtrip() {
    for_each_factory(|name, factory| {
        {
            let session = factory.open_session();
            session.add(&mut TestDocument::new(1, "foo bar")).unwrap();
        }

        let session = factory.open_session();
        let found: TestDocument = session.get(1i32).unwrap().expect(name);
        assert_eq!(found.id, 1, "{}", name);
        assert_eq!(found.name, "foo bar", "{}", name);
        assert_eq!(found.description, "something good!", "{}", name);
    });
}

#[test]
fn multiple_documents_roundtrip() {
    for_each_factory(|name, factory| {
        let session = factory.open_session();
        session.add(&mut TestDocument::new(1, "one")).unwrap();
        session.add(&mut TestDocument::new(2, "two")).unwrap();

        let all: Vec<TestDocument> = session.get_all().unwrap();
        assert_eq!(all.len(), 2, "{}", name);
        assert_eq!(session.count::<TestDocument>().unwrap(), 2, "{}", name);
    });
}

#[test]
fn removed_documents_are_not_retrievable() {
    for_each_factory(|name, factory| {
        let session = factory.open_session();
        session.add(&mut TestDocument::new(1, "one")).unwrap();
        session.add(&mut TestDocument::new(2, "two")).unwrap();

        let second: TestDocument = session.get(2i32).unwrap().unwrap();
        assert!(session.remove(&second).unwrap(), "{}", name);

        let all: Vec<TestDocument> = session.get_all().unwrap();
        assert_eq!(all, vec![TestDocument::new(1, "one")], "{}", name);
        assert!(session.get::<TestDocument>(2i32).unwrap().is_none());
    });
}

#[test]
fn removing_absent_document_returns_false() {
    let factory = in_memory();
    let session = factory.open_session();
    assert!(!session.remove(&TestDocument::new(42, "ghost")).unwrap());
}

#[test]
fn re_adding_overwrites() {
    let factory = in_memory();
    let session = factory.open_session();

    session.add(&mut TestDocument::new(5, "before")).unwrap();
    session.add(&mut TestDocument::new(5, "after")).unwrap();

    assert_eq!(session.count::<TestDocument>().unwrap(), 1);
    let found: TestDocument = session.get(5i32).unwrap().unwrap();
    assert_eq!(found.name, "after");
}

#[test]
fn get_many_returns_store_order_and_skips_missing() {
    for_each_factory(|name, factory| {
        let session = factory.open_session();
        for id in [3, 1, 2, 10] {
            session.add(&mut TestDocument::new(id, "doc")).unwrap();
        }

        let found: Vec<TestDocument> = session.get_many([10i32, 2, 99, 1]).unwrap();
        let ids: Vec<i32> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 10], "{}", name);
    });
}

#[test]
fn get_all_is_in_key_order_when_added_out_of_order() {
    let factory = in_memory();
    let session = factory.open_session();

    for id in [3, 1, 2] {
        session.add(&mut TestDocument::new(id, "doc")).unwrap();
    }

    let ids: Vec<i32> = session
        .get_all::<TestDocument>()
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn numeric_order_beats_lexical_order() {
    let factory = in_memory();
    let session = factory.open_session();

    for id in [9, 10, 100, 2] {
        session.add(&mut TestDocument::new(id, "doc")).unwrap();
    }

    let ids: Vec<i32> = session
        .get_all::<TestDocument>()
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![2, 9, 10, 100]);
}

#[test]
fn types_do_not_see_each_other() {
    let factory = in_memory();
    let session = factory.open_session();

    session.add(&mut TestDocument::new(1, "doc")).unwrap();
    session
        .add(&mut Invoice { id: 1, total: 100 })
        .unwrap();
    session
        .add(&mut SingletonDocument {
            name: "settings".to_string(),
        })
        .unwrap();

    assert_eq!(session.count::<TestDocument>().unwrap(), 1);
    assert_eq!(session.count::<Invoice>().unwrap(), 1);
    assert_eq!(session.count::<SingletonDocument>().unwrap(), 1);
    assert!(session.get::<Invoice>(1i16).unwrap().is_some());
}

#[test]
fn custom_document_name_is_used_for_keys() {
    let TempFactory { factory, dir } = TempFactory::open();
    {
        let session = factory.open_session();
        session.add(&mut Invoice { id: 7, total: 12 }).unwrap();
        let found: Invoice = session.get(7i16).unwrap().unwrap();
        assert_eq!(found.total, 12);
    }
    factory.close().unwrap();

    let store = PersistentStore::open(dir.path()).unwrap();
    assert_eq!(store.keys().unwrap(), vec!["Bill-00007".to_string()]);
}

#[test]
fn text_ids_are_used_verbatim() {
    let factory = in_memory();
    let session = factory.open_session();

    session
        .add(&mut Tag {
            id: "rust".to_string(),
        })
        .unwrap();

    let found: Tag = session.get("rust").unwrap().unwrap();
    assert_eq!(found.id, "rust");
}
