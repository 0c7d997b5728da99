use roster_core::command::match_reference;
use roster_core::{
    CancelAll, Category, CategoryRule, Choice, Command, CommandError, Disambiguation,
    Disambiguator, Email, Index, MatchTier, Name, Note, Person, PersonFilter, PersonRef, Phone,
    RecordStore, Resolution, Tag,
};

/// Replays fixed answers and records every request it saw.
struct ScriptedChoices {
    answers: Vec<Choice>,
    seen: Vec<(MatchTier, Vec<String>)>,
}

impl ScriptedChoices {
    fn new(answers: &[Choice]) -> Self {
        Self {
            answers: answers.iter().rev().copied().collect(),
            seen: Vec::new(),
        }
    }
}

impl Disambiguator for ScriptedChoices {
    fn choose(&mut self, request: &Disambiguation<'_>) -> Choice {
        self.seen.push((
            request.tier,
            request
                .candidates
                .iter()
                .map(|person| person.phone().to_string())
                .collect(),
        ));
        self.answers.pop().unwrap_or(Choice::Cancelled)
    }
}

fn person(name: &str, phone: &str) -> Person {
    Person::new(
        Name::new(name).unwrap(),
        Phone::new(phone).unwrap(),
        Email::new("someone@example.com").unwrap(),
        Category::new("colleague", &CategoryRule::contact()).unwrap(),
        Note::empty(),
        Vec::<Tag>::new(),
    )
}

fn sample_store() -> RecordStore {
    RecordStore::from_persons(vec![
        person("Alice Pauline", "94351253"),
        person("Benson Meier", "98765432"),
        person("George Best", "94824420"),
        person("Daniel Meier", "87652533"),
        person("George Best", "94824427"),
    ])
}

fn delete(reference: PersonRef) -> Command {
    Command::Delete(reference)
}

fn by_name(name: &str) -> PersonRef {
    PersonRef::ByName(name.to_string())
}

fn selected(one_based: usize) -> Choice {
    Choice::Selected(Index::from_one_based(one_based).unwrap())
}

#[test]
fn identical_names_always_prompt_with_every_exact_match() {
    let mut store = sample_store();
    let mut prompt = ScriptedChoices::new(&[selected(2)]);

    let outcome = delete(by_name("george best"))
        .execute(&mut store, &CategoryRule::contact(), &mut prompt)
        .unwrap();

    assert_eq!(
        prompt.seen,
        vec![(
            MatchTier::Exact,
            vec!["94824420".to_string(), "94824427".to_string()]
        )]
    );
    assert!(outcome.feedback.starts_with("Deleted Person: George Best; Phone: 94824427"));
    assert_eq!(store.len(), 4);
    assert!(store.persons().iter().any(|p| p.phone().as_str() == "94824420"));
}

#[test]
fn single_exact_match_short_circuits_partial_matches() {
    let mut store = sample_store();
    store.add(person("Alice Paulineson", "81234567"));

    let outcome = delete(by_name("ALICE   pauline"))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap();

    assert!(outcome.feedback.contains("Phone: 94351253"));
    assert_eq!(store.len(), 5);
}

#[test]
fn partial_matches_keep_filtered_view_order() {
    let store = sample_store();
    let view = store.filtered_view();

    let resolution = match_reference(&view, &by_name("meier")).unwrap();
    match resolution {
        Resolution::Ambiguous { tier, candidates } => {
            assert_eq!(tier, MatchTier::Partial);
            let names = candidates
                .iter()
                .map(|person| person.name().to_string())
                .collect::<Vec<_>>();
            assert_eq!(names, vec!["Benson Meier", "Daniel Meier"]);
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn single_partial_match_still_asks_for_confirmation() {
    let mut store = sample_store();
    let mut prompt = ScriptedChoices::new(&[selected(1)]);

    delete(by_name("hn Do"))
        .execute(&mut store, &CategoryRule::contact(), &mut prompt)
        .unwrap_err();
    assert!(prompt.seen.is_empty());

    delete(by_name("ice Pau"))
        .execute(&mut store, &CategoryRule::contact(), &mut prompt)
        .unwrap();
    assert_eq!(prompt.seen.len(), 1);
    assert_eq!(prompt.seen[0].0, MatchTier::Partial);
    assert_eq!(store.len(), 4);
}

#[test]
fn unknown_name_fails_without_prompting() {
    let mut store = sample_store();
    let mut prompt = ScriptedChoices::new(&[]);

    let err = delete(by_name("Charlotte Oliveiro"))
        .execute(&mut store, &CategoryRule::contact(), &mut prompt)
        .unwrap_err();

    assert!(matches!(err, CommandError::NoMatch(_)));
    assert_eq!(err.to_string(), "No person matches the name: Charlotte Oliveiro");
    assert!(prompt.seen.is_empty());
    assert_eq!(store.len(), 5);
}

#[test]
fn cancelling_disambiguation_leaves_store_unchanged() {
    let mut store = sample_store();
    let before = store.persons().to_vec();

    let err = delete(by_name("George Best"))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap_err();

    assert!(matches!(err, CommandError::Cancelled));
    assert_eq!(err.to_string(), "Deletion cancelled.");
    assert_eq!(store.persons(), before.as_slice());
}

#[test]
fn choice_outside_candidates_is_an_invalid_index() {
    let mut store = sample_store();
    let mut prompt = ScriptedChoices::new(&[selected(3)]);

    let err = delete(by_name("George Best"))
        .execute(&mut store, &CategoryRule::contact(), &mut prompt)
        .unwrap_err();

    assert!(matches!(err, CommandError::InvalidIndex));
    assert_eq!(store.len(), 5);
}

#[test]
fn index_addresses_the_filtered_view() {
    let mut store = sample_store();
    store.set_filter(PersonFilter::NameKeywords(vec!["meier".to_string()]));
    let view_len = store.filtered_view().len();

    let err = delete(PersonRef::ByIndex(Index::from_one_based(view_len + 1).unwrap()))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidIndex));
    assert_eq!(err.to_string(), "The person index provided is invalid");
    assert_eq!(store.len(), 5);

    let outcome = delete(PersonRef::ByIndex(Index::from_one_based(2).unwrap()))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap();
    assert!(outcome.feedback.starts_with("Deleted Person: Daniel Meier"));
    assert_eq!(store.len(), 4);
}

#[test]
fn name_resolution_ignores_records_hidden_by_the_filter() {
    let mut store = sample_store();
    store.set_filter(PersonFilter::PhoneKeywords(vec!["94824420".to_string()]));

    let outcome = delete(by_name("George Best"))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap();

    assert!(outcome.feedback.contains("Phone: 94824420"));
    assert_eq!(store.len(), 4);
}

#[test]
fn name_reference_matches_across_full_case_fold() {
    let mut store = sample_store();
    store.add(person("Johann Strauß", "81234567"));

    let outcome = delete(by_name("johann STRAUSS"))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap();

    assert!(outcome.feedback.starts_with("Deleted Person: Johann Strauß"));
    assert_eq!(store.len(), 5);
}

#[test]
fn index_delete_removes_the_displayed_record_among_equal_twins() {
    let mut store = RecordStore::from_persons(vec![
        person("George Best", "94824420"),
        person("george best", "94824420"),
    ]);

    let outcome = delete(PersonRef::ByIndex(Index::from_one_based(2).unwrap()))
        .execute(&mut store, &CategoryRule::contact(), &mut CancelAll)
        .unwrap();

    assert!(outcome.feedback.starts_with("Deleted Person: george best"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.persons()[0].name().as_str(), "George Best");
}
