use roster_core::{
    Category, CategoryRule, Email, Name, Note, Person, PersonFilter, Phone, RecordStore,
    StoreError, Tag,
};

fn person(name: &str, phone: &str, tags: &[&str]) -> Person {
    Person::new(
        Name::new(name).unwrap(),
        Phone::new(phone).unwrap(),
        Email::new("someone@example.com").unwrap(),
        Category::new("student", &CategoryRule::contact()).unwrap(),
        Note::empty(),
        tags.iter().map(|tag| Tag::new(tag).unwrap()),
    )
}

fn sample_store() -> RecordStore {
    RecordStore::from_persons(vec![
        person("Alice Pauline", "94351253", &["friends"]),
        person("Benson Meier", "98765432", &["owesMoney", "friends"]),
        person("Carl Kurz", "95352563", &[]),
        person("Daniel Meier", "87652533", &["friends"]),
    ])
}

fn names(view: &[&Person]) -> Vec<String> {
    view.iter().map(|person| person.name().to_string()).collect()
}

#[test]
fn filtered_view_is_derived_and_never_mutates_the_list() {
    let mut store = sample_store();
    store.set_filter(PersonFilter::NameKeywords(vec!["meier".to_string()]));

    assert_eq!(
        names(&store.filtered_view()),
        vec!["Benson Meier", "Daniel Meier"]
    );
    assert_eq!(store.len(), 4);

    store.show_all();
    assert!(store.filter().is_all());
    assert_eq!(store.filtered_view().len(), 4);
}

#[test]
fn keyword_filters_cover_name_phone_and_tag() {
    let mut store = sample_store();

    store.set_filter(PersonFilter::NameKeywords(vec!["kur".into(), "ALI".into()]));
    assert_eq!(names(&store.filtered_view()), vec!["Alice Pauline", "Carl Kurz"]);

    store.set_filter(PersonFilter::PhoneKeywords(vec!["2533".into()]));
    assert_eq!(names(&store.filtered_view()), vec!["Daniel Meier"]);

    store.set_filter(PersonFilter::TagKeywords(vec!["MONEY".into()]));
    assert_eq!(names(&store.filtered_view()), vec!["Benson Meier"]);

    store.set_filter(PersonFilter::NameKeywords(Vec::new()));
    assert!(store.filtered_view().is_empty());
}

#[test]
fn view_where_leaves_active_filter_untouched() {
    let store = sample_store();
    let tagged = store.view_where(|person| !person.tags().is_empty());
    assert_eq!(tagged.len(), 3);
    assert!(store.filter().is_all());
}

#[test]
fn remove_and_replace_target_exact_records() {
    let mut store = sample_store();
    let carl = store.persons()[2].clone();

    let removed = store.remove(&carl).unwrap();
    assert_eq!(removed, carl);
    assert_eq!(store.len(), 3);

    let err = store.remove(&carl).unwrap_err();
    assert_eq!(err, StoreError::NotFound("Carl Kurz".to_string()));

    let alice = store.persons()[0].clone();
    let edited = alice.with_note(Note::new("met at orientation").unwrap());
    store.replace(&alice, edited.clone()).unwrap();
    assert_eq!(store.persons()[0], edited);
    assert!(store.replace(&alice, edited).is_err());
}

#[test]
fn add_does_not_check_duplicates_but_contains_same_person_does() {
    let mut store = sample_store();
    let twin = person("alice  pauline", "9435 1253", &[]);

    assert!(store.contains_same_person(&twin));
    store.add(twin);
    assert_eq!(store.len(), 5);
}

#[test]
fn selected_slot_follows_replace_and_clears_on_remove() {
    let mut store = sample_store();
    let benson = store.persons()[1].clone();
    store.select(benson.clone());

    let edited = benson.with_note(Note::new("owes $5").unwrap());
    store.replace(&benson, edited.clone()).unwrap();
    assert_eq!(store.selected(), Some(&edited));

    store.remove(&edited).unwrap();
    assert_eq!(store.selected(), None);
}

#[test]
fn slot_operations_address_the_borrowed_record_not_an_equal_one() {
    let mut store = RecordStore::from_persons(vec![
        person("George Best", "94824420", &[]),
        person("george best", "94824420", &[]),
    ]);
    assert_eq!(store.persons()[0], store.persons()[1]);

    let position = {
        let view = store.filtered_view();
        store.position_of_record(view[1]).unwrap()
    };
    assert_eq!(position, 1);

    let removed = store.remove_at(position).unwrap();
    assert_eq!(removed.name().as_str(), "george best");
    assert_eq!(store.persons()[0].name().as_str(), "George Best");

    let stray = person("George Best", "94824420", &[]);
    assert_eq!(
        store.position_of_record(&stray).unwrap_err(),
        StoreError::NotFound("George Best".to_string())
    );
    assert_eq!(
        store.remove_at(3).unwrap_err(),
        StoreError::PositionOutOfRange(3)
    );
    assert!(store.replace_at(1, stray).is_err());
}
