//! Integration tests for selector subscriptions.

use parking_lot::Mutex;
use slice_watch::{subscribe_with_selector, SelectorExt, Store};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
struct Author {
    first_name: String,
    last_name: String,
}

#[derive(Clone, Debug, PartialEq)]
struct Book {
    title: String,
    author: Arc<Author>,
}

type Calls<T> = Arc<Mutex<Vec<(T, Arc<Book>, Arc<Book>)>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn book_store() -> Store<Book> {
    init_tracing();
    Store::new(Book {
        title: "Default".to_string(),
        author: Arc::new(Author {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }),
    })
}

fn book(title: &str, first_name: &str) -> Book {
    Book {
        title: title.to_string(),
        author: Arc::new(Author {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
        }),
    }
}

fn set_title(store: &Store<Book>, title: &str) {
    store.update(|b| Book {
        title: title.to_string(),
        ..b.clone()
    });
}

fn set_author(store: &Store<Book>, first_name: &str) {
    store.update(|b| Book {
        author: Arc::new(Author {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
        }),
        ..b.clone()
    });
}

fn recorder<T: Send + 'static>() -> (
    Calls<T>,
    impl Fn(T, &Arc<Book>, &Arc<Book>) + Send + Sync + 'static,
) {
    let calls: Calls<T> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let callback = move |slice: T, next: &Arc<Book>, prev: &Arc<Book>| {
        sink.lock().push((slice, Arc::clone(next), Arc::clone(prev)));
    };
    (calls, callback)
}

// --- Slice Changes ---

#[test]
fn test_calls_subscription_when_slice_changes() {
    let store = book_store();
    let (calls, callback) = recorder::<String>();

    subscribe_with_selector(&store, |b| b.title.clone(), callback);
    assert!(calls.lock().is_empty());

    set_title(&store, "First");
    {
        let calls = calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "First");
        assert_eq!(*calls[0].1, book("First", "John"));
        assert_eq!(*calls[0].2, book("Default", "John"));
    }

    set_title(&store, "Second");
    let calls = calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "Second");
    assert_eq!(*calls[1].1, book("Second", "John"));
    assert_eq!(*calls[1].2, book("First", "John"));
}

#[test]
fn test_supports_nested_slices() {
    let store = book_store();
    let (calls, callback) = recorder::<String>();

    store.subscribe_with_selector(|b| b.author.first_name.clone(), callback);
    assert!(calls.lock().is_empty());

    set_author(&store, "Jane");

    let calls = calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Jane");
    assert_eq!(*calls[0].1, book("Default", "Jane"));
    assert_eq!(*calls[0].2, book("Default", "John"));
}

#[test]
fn test_ignores_updates_to_unrelated_slices() {
    let store = book_store();
    let (calls, callback) = recorder::<String>();

    store.subscribe_with_selector(|b| b.title.clone(), callback);
    set_author(&store, "Jane");

    assert!(calls.lock().is_empty());
}

#[test]
fn test_passes_committed_states_not_copies() {
    let store = book_store();
    let (calls, callback) = recorder::<String>();
    store.subscribe_with_selector(|b| b.title.clone(), callback);

    let before = store.get_state();
    set_title(&store, "First");
    let after = store.get_state();

    let calls = calls.lock();
    assert!(Arc::ptr_eq(&calls[0].1, &after));
    assert!(Arc::ptr_eq(&calls[0].2, &before));
}

#[test]
fn test_reference_slice_changes_on_new_allocation() {
    let store = book_store();
    let (calls, callback) = recorder::<Arc<Author>>();
    store.subscribe_with_selector(|b| Arc::clone(&b.author), callback);

    // Shared author survives a title change.
    set_title(&store, "First");
    assert!(calls.lock().is_empty());

    // Equal contents, new allocation: identity changed.
    set_author(&store, "John");
    let calls = calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.first_name, "John");
}

#[test]
fn test_setting_equal_scalar_is_not_a_change() {
    let store = book_store();
    let (calls, callback) = recorder::<String>();
    store.subscribe_with_selector(|b| b.title.clone(), callback);

    set_title(&store, "Default");
    assert!(calls.lock().is_empty());
}

#[test]
fn test_tuple_slice_watches_several_fields() {
    let store = book_store();
    let (calls, callback) = recorder::<(String, Arc<Author>)>();
    store.subscribe_with_selector(|b| (b.title.clone(), Arc::clone(&b.author)), callback);

    set_title(&store, "First");
    set_author(&store, "Jane");
    store.update(|b| b.clone());

    assert_eq!(calls.lock().len(), 2);
}

// --- Unsubscribe ---

#[test]
fn test_returns_the_unsubscribe_function() {
    let store = book_store();
    let (calls, callback) = recorder::<String>();

    let unsubscribe = subscribe_with_selector(&store, |b| b.title.clone(), callback);
    assert_eq!(store.listener_count(), 1);

    set_title(&store, "First");
    assert_eq!(calls.lock().len(), 1);

    unsubscribe.unsubscribe();
    assert_eq!(store.listener_count(), 0);

    set_title(&store, "Second");
    set_title(&store, "Third");
    assert_eq!(calls.lock().len(), 1);
}

#[test]
fn test_unsubscribe_twice_is_harmless() {
    let store = book_store();
    let (_calls, callback) = recorder::<String>();
    let (_other_calls, other) = recorder::<String>();

    let unsubscribe = store.subscribe_with_selector(|b| b.title.clone(), callback);
    store.subscribe_with_selector(|b| b.title.clone(), other);

    unsubscribe.unsubscribe();
    unsubscribe.clone().unsubscribe();

    assert_eq!(store.listener_count(), 1);
}

#[test]
fn test_independent_subscriptions() {
    let store = book_store();
    let (titles, on_title) = recorder::<String>();
    let (names, on_name) = recorder::<String>();

    let stop_titles = store.subscribe_with_selector(|b| b.title.clone(), on_title);
    store.subscribe_with_selector(|b| b.author.first_name.clone(), on_name);

    set_title(&store, "First");
    set_author(&store, "Jane");
    stop_titles.unsubscribe();
    set_title(&store, "Second");
    set_author(&store, "Ann");

    assert_eq!(titles.lock().len(), 1);
    let names: Vec<String> = names.lock().iter().map(|c| c.0.clone()).collect();
    assert_eq!(names, vec!["Jane".to_string(), "Ann".to_string()]);
}
