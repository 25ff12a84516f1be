//! Integration tests for posts, announcements, events, directory, profiles.

use campusnet_domain::api::ProfileUpdate;
use campusnet_domain::directory::{Class, Department, Major};
use campusnet_domain::ids::UserId;
use campusnet_store::accounts::AccountStore;
use campusnet_store::announcements::AnnouncementBoard;
use campusnet_store::directory::Directory;
use campusnet_store::events::EventCalendar;
use campusnet_store::posts::PostBoard;
use campusnet_store::profiles::ProfileStore;
use campusnet_store::{DocumentDb, StoreError};

#[test]
fn publish_and_feed_newest_first() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (u1, u2) = (UserId::new(), UserId::new());

    let first = PostBoard::new(&mut db)
        .publish(&u1, "first".into(), String::new())
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = PostBoard::new(&mut db)
        .publish(&u2, "second".into(), String::new())
        .unwrap();

    let feed = PostBoard::new(&mut db).feed().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].post_id, second.post_id);
    assert_eq!(feed[1].post_id, first.post_id);
}

#[test]
fn post_like_toggles_flag_and_count_together() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (author, viewer) = (UserId::new(), UserId::new());
    let post = PostBoard::new(&mut db)
        .publish(&author, "hello".into(), String::new())
        .unwrap();

    let (liked, count) = PostBoard::new(&mut db)
        .toggle_post_like(&viewer, &author, &post.post_id)
        .unwrap();
    assert!(liked);
    assert_eq!(count, 1);

    let board = PostBoard::new(&mut db);
    assert!(board.post_liked_by(&viewer, &author, &post.post_id).unwrap());
    assert_eq!(board.get_post(&author, &post.post_id).unwrap().like_count, 1);

    // Second press unlikes and decrements.
    let (liked, count) = PostBoard::new(&mut db)
        .toggle_post_like(&viewer, &author, &post.post_id)
        .unwrap();
    assert!(!liked);
    assert_eq!(count, 0);
}

#[test]
fn likes_from_two_viewers_accumulate() {
    let mut db = DocumentDb::in_memory().unwrap();
    let author = UserId::new();
    let post = PostBoard::new(&mut db)
        .publish(&author, "hello".into(), String::new())
        .unwrap();

    for viewer in [UserId::new(), UserId::new()] {
        PostBoard::new(&mut db)
            .toggle_post_like(&viewer, &author, &post.post_id)
            .unwrap();
    }
    assert_eq!(
        PostBoard::new(&mut db)
            .get_post(&author, &post.post_id)
            .unwrap()
            .like_count,
        2
    );
}

#[test]
fn like_on_missing_post_is_not_found() {
    let mut db = DocumentDb::in_memory().unwrap();
    let result = PostBoard::new(&mut db).toggle_post_like(
        &UserId::new(),
        &UserId::new(),
        &campusnet_domain::ids::PostId::new(),
    );
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn thread_assembles_comments_with_nested_replies() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (author, commenter, replier) = (UserId::new(), UserId::new(), UserId::new());
    let post = PostBoard::new(&mut db)
        .publish(&author, "post".into(), String::new())
        .unwrap();

    let comment = PostBoard::new(&mut db)
        .add_comment(&author, &post.post_id, &commenter, "nice".into())
        .unwrap();
    let reply = PostBoard::new(&mut db)
        .add_reply(
            &author,
            &post.post_id,
            &comment.comment_id,
            &replier,
            "agreed".into(),
            Some(commenter),
        )
        .unwrap();

    let (fetched, thread) = PostBoard::new(&mut db)
        .thread_for(&author, &post.post_id)
        .unwrap();
    assert_eq!(fetched.post_id, post.post_id);
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].comment.comment_id, comment.comment_id);
    assert_eq!(thread[0].replies.len(), 1);
    assert_eq!(thread[0].replies[0].reply_id, reply.reply_id);
    assert_eq!(thread[0].replies[0].tagged_user_id, Some(commenter));

    // Replies do not count as comments.
    let count = PostBoard::new(&mut db)
        .comment_count(&author, &post.post_id)
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn comment_and_reply_likes() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (author, viewer) = (UserId::new(), UserId::new());
    let post = PostBoard::new(&mut db)
        .publish(&author, "post".into(), String::new())
        .unwrap();
    let comment = PostBoard::new(&mut db)
        .add_comment(&author, &post.post_id, &viewer, "hi".into())
        .unwrap();
    let reply = PostBoard::new(&mut db)
        .add_reply(
            &author,
            &post.post_id,
            &comment.comment_id,
            &viewer,
            "hello".into(),
            None,
        )
        .unwrap();

    let (liked, count) = PostBoard::new(&mut db)
        .toggle_comment_like(&viewer, &author, &post.post_id, &comment.comment_id)
        .unwrap();
    assert!(liked);
    assert_eq!(count, 1);

    let (liked, count) = PostBoard::new(&mut db)
        .toggle_reply_like(
            &viewer,
            &author,
            &post.post_id,
            &comment.comment_id,
            &reply.reply_id,
        )
        .unwrap();
    assert!(liked);
    assert_eq!(count, 1);
}

#[test]
fn comment_on_missing_post_rejected() {
    let mut db = DocumentDb::in_memory().unwrap();
    let result = PostBoard::new(&mut db).add_comment(
        &UserId::new(),
        &campusnet_domain::ids::PostId::new(),
        &UserId::new(),
        "hi".into(),
    );
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn announcement_read_is_write_once_and_pin_toggles() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (announcer, reader) = (UserId::new(), UserId::new());
    let announcement = AnnouncementBoard::new(&mut db)
        .publish(&announcer, "Exam week".into(), "Rooms posted".into(), String::new())
        .unwrap();

    let board = AnnouncementBoard::new(&mut db);
    let state = board.state_for(&reader, &announcement.announcement_id).unwrap();
    assert!(!state.read);
    assert!(!state.pinned);

    AnnouncementBoard::new(&mut db)
        .mark_read(&reader, &announcement.announcement_id)
        .unwrap();
    // Marking again keeps it read.
    AnnouncementBoard::new(&mut db)
        .mark_read(&reader, &announcement.announcement_id)
        .unwrap();

    let pinned = AnnouncementBoard::new(&mut db)
        .toggle_pin(&reader, &announcement.announcement_id)
        .unwrap();
    assert!(pinned);
    let pinned = AnnouncementBoard::new(&mut db)
        .toggle_pin(&reader, &announcement.announcement_id)
        .unwrap();
    assert!(!pinned);

    let state = AnnouncementBoard::new(&mut db)
        .state_for(&reader, &announcement.announcement_id)
        .unwrap();
    assert!(state.read);
    assert!(!state.pinned);
}

#[test]
fn unread_count_drops_after_reading() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (announcer, reader) = (UserId::new(), UserId::new());

    let a = AnnouncementBoard::new(&mut db)
        .publish(&announcer, "A".into(), "a".into(), String::new())
        .unwrap();
    AnnouncementBoard::new(&mut db)
        .publish(&announcer, "B".into(), "b".into(), String::new())
        .unwrap();

    assert_eq!(
        AnnouncementBoard::new(&mut db).unread_count(&reader).unwrap(),
        2
    );

    AnnouncementBoard::new(&mut db)
        .mark_read(&reader, &a.announcement_id)
        .unwrap();
    assert_eq!(
        AnnouncementBoard::new(&mut db).unread_count(&reader).unwrap(),
        1
    );
}

#[test]
fn events_sorted_by_start_time() {
    let mut db = DocumentDb::in_memory().unwrap();
    let organizer = UserId::new();

    EventCalendar::new(&mut db)
        .publish(&organizer, "Later".into(), String::new(), "Hall B".into(), 2_000)
        .unwrap();
    EventCalendar::new(&mut db)
        .publish(&organizer, "Sooner".into(), String::new(), "Hall A".into(), 1_000)
        .unwrap();

    let events = EventCalendar::new(&mut db).list_all().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Sooner");
    assert_eq!(events[1].title, "Later");
}

#[test]
fn directory_cascade_filters_by_parent() {
    let mut db = DocumentDb::in_memory().unwrap();
    let mut directory = Directory::new(&mut db);

    directory
        .add_department(&Department {
            department_id: "cs".into(),
            name: "Computer Science".into(),
        })
        .unwrap();
    directory
        .add_major(&Major {
            major_id: "se".into(),
            name: "Software Engineering".into(),
            department_id: "cs".into(),
        })
        .unwrap();
    directory
        .add_major(&Major {
            major_id: "acc".into(),
            name: "Accounting".into(),
            department_id: "biz".into(),
        })
        .unwrap();
    directory
        .add_class(&Class {
            class_id: "se-k19".into(),
            name: "SE K19".into(),
            major_id: "se".into(),
        })
        .unwrap();

    let departments = directory.departments().unwrap();
    assert_eq!(departments.len(), 1);

    let majors = directory.majors_in("cs").unwrap();
    assert_eq!(majors.len(), 1);
    assert_eq!(majors[0].major_id, "se");

    let classes = directory.classes_in("se").unwrap();
    assert_eq!(classes.len(), 1);
    assert!(directory.classes_in("acc").unwrap().is_empty());
}

#[test]
fn profile_update_and_search() {
    let mut db = DocumentDb::in_memory().unwrap();
    let (_, profile) = AccountStore::new(&mut db)
        .register("an@campus.edu", "pw", "20251234")
        .unwrap();
    assert!(!profile.is_complete());

    let update = ProfileUpdate {
        display_name: Some("An Nguyen".into()),
        bio: Some("first year".into()),
        ..Default::default()
    };
    let updated = ProfileStore::new(&mut db)
        .apply_update(&profile.user_id, &update)
        .unwrap();
    assert!(updated.is_complete());
    assert_eq!(updated.student_number, "20251234");

    let by_name = ProfileStore::new(&mut db).search("nguyen").unwrap();
    assert_eq!(by_name.len(), 1);

    let by_number = ProfileStore::new(&mut db).search("2025").unwrap();
    assert_eq!(by_number.len(), 1);

    assert!(ProfileStore::new(&mut db).search("missing").unwrap().is_empty());
}
