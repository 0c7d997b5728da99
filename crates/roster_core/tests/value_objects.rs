use roster_core::{Category, CategoryRule, Email, Name, Note, Phone, Tag, ValidationError};

#[test]
fn normalization_is_idempotent() {
    let name = Name::new("  John    Doe ").unwrap();
    assert_eq!(name, Name::new(name.as_str()).unwrap());
    assert_eq!(name.as_str(), "John Doe");

    let phone = Phone::new("9876-5432").unwrap();
    assert_eq!(phone, Phone::new("98765432").unwrap());
    assert_eq!(phone, Phone::new(phone.as_str()).unwrap());
    assert_eq!(Phone::new("9876 54-32").unwrap().as_str(), "98765432");

    let email = Email::new(" Alex@Example.com ").unwrap();
    assert_eq!(email, Email::new(email.as_str()).unwrap());
}

#[test]
fn names_and_emails_compare_case_insensitively() {
    for raw in ["Ann-Marie O'Neil", "zoë lee", "George Best", "Strauß"] {
        assert_eq!(
            Name::new(raw).unwrap(),
            Name::new(&raw.to_uppercase()).unwrap()
        );
    }
    assert_eq!(
        Email::new("alice@example.com").unwrap(),
        Email::new("ALICE@EXAMPLE.COM").unwrap()
    );
    assert_eq!(Name::new("Strauß").unwrap(), Name::new("STRAUSS").unwrap());
    assert_eq!(Name::new("strauss").unwrap(), Name::new("Strauß").unwrap());
}

#[test]
fn name_keeps_display_casing() {
    let name = Name::new("McDonald   Old").unwrap();
    assert_eq!(name.to_string(), "McDonald Old");
    assert_eq!(name.normalized(), "mcdonald old");
}

#[test]
fn invalid_fields_report_their_constraint_message() {
    assert_eq!(Name::new("   ").unwrap_err(), ValidationError::InvalidName);
    assert_eq!(Name::new("R2D2").unwrap_err(), ValidationError::InvalidName);
    assert_eq!(Phone::new("12345678").unwrap_err(), ValidationError::InvalidPhone);
    assert_eq!(Phone::new("9123456").unwrap_err(), ValidationError::InvalidPhone);
    assert_eq!(Email::new("peter@example.c").unwrap_err(), ValidationError::InvalidEmail);
    assert_eq!(Email::new("-peter@example.com").unwrap_err(), ValidationError::InvalidEmail);
    assert_eq!(
        Name::new("").unwrap_err().to_string(),
        "Names should only contain alphabetic characters, spaces, hyphens, and apostrophes, \
and it should not be blank"
    );
    assert_eq!(
        Tag::new("best friend").unwrap_err().to_string(),
        "Tags names should be alphanumeric"
    );
}

#[test]
fn predicates_agree_with_constructors() {
    for raw in ["98765432", "8765 4321", "9876-5432", "71234567", "", "abc"] {
        assert_eq!(Phone::is_valid(raw), Phone::new(raw).is_ok(), "{raw:?}");
    }
    for raw in ["a@bc.de", "a.b+c@d-e.fg", "a..b@c.de", "a@b", "a@b.c"] {
        assert_eq!(Email::is_valid(raw), Email::new(raw).is_ok(), "{raw:?}");
    }
}

#[test]
fn note_length_and_control_character_boundaries() {
    let exactly_max = "a".repeat(500);
    assert!(Note::new(&exactly_max).is_ok());
    assert_eq!(
        Note::new(&"a".repeat(501)).unwrap_err(),
        ValidationError::InvalidNote
    );
    assert!(Note::new("rings the \u{0007} bell").is_err());
    assert!(Note::new("tab\tinside").is_err());
    assert!(Note::new("del\u{007F}").is_err());

    let note = Note::new("  Allergic to peanut.  ").unwrap();
    assert_eq!(note.as_str(), "  Allergic to peanut.  ");
    assert!(Note::new("").unwrap().is_empty());
}

#[test]
fn category_follows_injected_rule() {
    let contact = CategoryRule::contact();
    assert_eq!(Category::new(" Student ", &contact).unwrap().as_str(), "student");
    assert!(Category::new("3B", &contact).is_err());

    let class = CategoryRule::class();
    assert_eq!(Category::new("3b", &class).unwrap().as_str(), "3B");
    assert!(Category::new("7A", &class).is_err());
    assert!(Category::is_valid("6d", &class));

    let kindergarten = CategoryRule::kindergarten();
    assert_eq!(Category::new("k2c", &kindergarten).unwrap().as_str(), "K2C");
    assert!(Category::new("K3A", &kindergarten).is_err());

    let err = Category::new("parent", &contact).unwrap_err();
    assert_eq!(err.to_string(), contact.constraint());
}

#[test]
fn category_messages_depend_only_on_category() {
    let class = CategoryRule::class();
    let category = Category::new("1A", &class).unwrap();
    assert_eq!(class.announce(&category), "New student added to class 1A");

    let contact = CategoryRule::contact();
    let colleague = Category::new("Colleague", &contact).unwrap();
    assert_eq!(contact.announce(&colleague), "New colleague added");

    let kindergarten = CategoryRule::kindergarten();
    let pupil = Category::new("K1A", &kindergarten).unwrap();
    assert_eq!(kindergarten.announce(&pupil), "New pupil added to K1A");
}

#[test]
fn tags_are_trimmed_and_accept_unicode_alphanumerics() {
    assert_eq!(Tag::new(" friends ").unwrap().as_str(), "friends");
    assert_eq!(Tag::new("同学2").unwrap().to_string(), "[同学2]");
    assert!(Tag::new("").is_err());
    assert!(Tag::new("a-b").is_err());
}
