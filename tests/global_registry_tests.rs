use logtree::{get_logger, registry, Error};

#[test]
fn global_lookups_share_one_tree() {
    let a = get_logger("global/a").unwrap();
    assert_eq!(get_logger("global/a").unwrap(), a);
    assert_eq!(registry().get_logger("global").unwrap().children(), vec!["a"]);
    assert_eq!(a.child("../..").unwrap(), *registry().root());
}

#[test]
fn global_root_has_no_parent() {
    assert_eq!(get_logger("..").unwrap_err(), Error::ParentOfRoot);
}
