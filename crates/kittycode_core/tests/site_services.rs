use kittycode_core::db::open_db_in_memory;
use kittycode_core::{
    fields, CollectionStore, ContactForm, ContactService, DeleteOutcome, ErrorKind, MemoryStore,
    ProjectType, Skill, SkillCategory, SkillService, SqliteCollectionStore, TeamMember,
    TeamService,
};

fn contact_form() -> ContactForm {
    ContactForm {
        name: "Lucía".to_string(),
        email: "lucia@example.com".to_string(),
        project_type: Some(ProjectType::App),
        message: "We need a booking app.".to_string(),
    }
}

#[test]
fn skills_are_grouped_and_filtered_by_shared_categories() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");
    let skills = SkillService::new(&store, "skills");

    skills
        .create(&Skill::new("React", 80, SkillCategory::Frontend).with_description("UI library"))
        .expect("create React");
    skills
        .create(&Skill::new("Teamwork", 95, SkillCategory::SoftSkills))
        .expect("create Teamwork");
    skills
        .create(&Skill::new("TailwindCSS", 75, SkillCategory::Frontend))
        .expect("create TailwindCSS");
    store
        .insert("skills", &fields([("name", "Uncategorized")]))
        .expect("insert uncategorized skill");

    assert_eq!(skills.list().expect("list skills").len(), 4);

    let groups = skills.list_grouped().expect("group skills");
    let categories: Vec<_> = groups.iter().map(|group| group.category).collect();
    assert_eq!(
        categories,
        vec![Some(SkillCategory::Frontend), Some(SkillCategory::SoftSkills)]
    );
    assert_eq!(groups[1].label, "Soft Skills");
    assert_eq!(groups[0].skills.len(), 2);
    assert_eq!(groups[0].skills[0].1.description, "UI library");

    let frontend = skills.list_in_category(SkillCategory::Frontend).expect("filter skills");
    let names: Vec<_> = frontend.iter().map(|(_, skill)| skill.name.as_str()).collect();
    assert_eq!(names, vec!["React", "TailwindCSS"]);
    assert!(skills
        .list_in_category(SkillCategory::Backend)
        .expect("filter skills")
        .is_empty());
}

#[test]
fn skills_with_free_form_category_are_still_grouped() {
    let store = MemoryStore::new();
    let skills = SkillService::new(&store, "skills");
    skills
        .create(&Skill::new("React", 80, SkillCategory::Frontend))
        .expect("create React");
    store
        .insert("skills", &fields([("name", "Docker"), ("category", "DevOps")]))
        .expect("insert skill with free-form category");

    let groups = skills.list_grouped().expect("group skills");

    let labels: Vec<_> = groups.iter().map(|group| group.label.as_str()).collect();
    assert_eq!(labels, vec!["Frontend", "DevOps"]);
    assert_eq!(groups[1].category, None);
    assert_eq!(groups[1].skills[0].1.name, "Docker");
}

#[test]
fn skill_edit_overwrites_fields_and_can_move_category() {
    let store = MemoryStore::new();
    let skills = SkillService::new(&store, "skills");
    let id = skills
        .create(&Skill::new("Node.js", 60, SkillCategory::Frontend))
        .expect("create Node.js");

    skills
        .update(&id, &Skill::new("Node.js", 85, SkillCategory::Backend))
        .expect("edit Node.js");

    let listed = skills.list().expect("list skills");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, id);
    assert_eq!(listed[0].1.level, 85);
    assert_eq!(listed[0].1.category, Some(SkillCategory::Backend));
}

#[test]
fn skill_without_name_is_rejected_locally() {
    let store = MemoryStore::new();
    let skills = SkillService::new(&store, "skills");

    let err = skills
        .create(&Skill::new("  ", 50, SkillCategory::Backend))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.validation_errors().expect("validation errors present").len(), 1);
    assert_eq!(store.call_count(), 0);
}

#[test]
fn team_member_crud_round_trip() {
    let store = MemoryStore::new();
    let team = TeamService::new(&store, "team_members");

    let mut member = TeamMember::new("Valentina", "Frontend developer");
    member.bio = "Loves cats and CSS.".to_string();
    let id = team.create(&member).expect("create member");
    assert_eq!(team.get(&id).expect("get member"), Some(member.clone()));

    team.update(&id, &fields([("role", "Tech lead")])).expect("update member");
    let updated = team.get(&id).expect("get member").expect("member still exists");
    assert_eq!(updated.role, "Tech lead");
    assert_eq!(updated.bio, member.bio);

    assert_eq!(team.delete(&id).expect("delete member"), DeleteOutcome::Removed);
    assert_eq!(team.get(&id).expect("get member"), None);
    assert!(team.list().expect("list team").is_empty());
}

#[test]
fn invalid_contact_email_blocks_the_write() {
    let store = MemoryStore::new();
    let contact = ContactService::new(&store, "contacts");
    let mut form = contact_form();
    form.email = "not-an-email".to_string();

    let err = contact.submit(&form).expect_err("malformed email must be rejected");

    assert_eq!(err.kind(), ErrorKind::Validation);
    let errors = err.validation_errors().expect("validation errors present");
    assert_eq!(errors.len(), 1);
    assert!(errors.for_field("email").is_some());
    assert_eq!(store.call_count(), 0);
}

#[test]
fn valid_contact_message_is_stored_with_timestamp() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");
    let contact = ContactService::new(&store, "contacts");

    let id = contact
        .submit_at(&contact_form(), 1_767_225_600_000)
        .expect("submit contact form");

    let stored = store.list("contacts").expect("list contacts");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].text("email"), Some("lucia@example.com"));
    assert_eq!(stored[0].text("projectType"), Some("app"));
    assert_eq!(stored[0].integer("createdAt"), Some(1_767_225_600_000));
}

#[test]
fn contact_write_denied_by_backend_is_a_permission_error() {
    let store = MemoryStore::new();
    store.deny_writes("contacts");
    let contact = ContactService::new(&store, "contacts");

    let err = contact.submit(&contact_form()).expect_err("write-protected collection must fail");
    assert_eq!(err.kind(), ErrorKind::Permission);
}
