use crate::common::KitupTest;

#[test]
fn test_which_exits_one_when_unavailable() {
    let kitup = KitupTest::new();
    let output = kitup.kitup(&["which", "aws"]);

    output.assert_failure();
    assert_eq!(output.stdout(), "");
}

#[cfg(unix)]
#[test]
fn test_which_prefers_global_install() {
    let kitup = KitupTest::new();
    kitup.create_global_tool("aws");
    kitup.create_managed_tool("aws-cli/aws");

    let output = kitup.kitup(&["which", "aws"]);

    output.assert_success();
    assert_eq!(output.stdout(), "aws\n");
}

#[cfg(unix)]
#[test]
fn test_which_falls_back_to_managed_install() {
    let kitup = KitupTest::new();
    kitup.create_managed_tool("aws-cli/aws");

    let output = kitup.kitup(&["which", "aws"]);

    output.assert_success();
    assert_eq!(output.normalized_stdout(), "/storage/cli/aws-cli/aws\n");
}

#[cfg(unix)]
#[test]
fn test_which_finds_the_session_manager_plugin() {
    let kitup = KitupTest::new();
    kitup.create_managed_tool("sessionmanagerplugin/bin/session-manager-plugin");

    let output = kitup.kitup(&["which", "session-manager-plugin"]);

    output.assert_success();
    assert_eq!(
        output.normalized_stdout(),
        "/storage/cli/sessionmanagerplugin/bin/session-manager-plugin\n"
    );
}
