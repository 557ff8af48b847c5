use crate::Error;

/// 必填参数为空时返回`Error::Usage`
pub(crate) fn check_required(name: &str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::Usage(format!("must provide `{name}`")));
    }
    Ok(())
}

#[test]
fn check_required_test() {
    assert!(check_required("to", "fr").is_ok());
    match check_required("language", "") {
        Err(Error::Usage(msg)) => assert_eq!(msg, "must provide `language`"),
        other => panic!("unexpected result: {:?}", other),
    }
}
