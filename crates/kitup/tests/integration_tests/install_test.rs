use crate::common::KitupTest;

#[test]
fn test_install_declined_at_the_prompt() {
    let kitup = KitupTest::new();
    let output = kitup.kitup_with_stdin(&["install", "aws"], "n\n");

    output.assert_success();
    assert!(
        output.stdout().contains("Skipped installing the AWS CLI"),
        "{}",
        output.stdout()
    );
    // Declined before anything touched the storage root.
    assert!(!kitup.scratch_parent().exists());
    assert!(!kitup.install_dir().join("aws-cli").exists());
}

#[test]
fn test_install_manual_choice_prints_instructions() {
    let kitup = KitupTest::new();
    let output = kitup.kitup_with_stdin(&["install", "aws"], "m\n");

    output.assert_success();
    let stdout = output.stdout();
    assert!(stdout.contains("Manual install instructions:"), "{stdout}");
    assert!(stdout.contains("Skipped installing the AWS CLI"), "{stdout}");
}

#[cfg(unix)]
#[test]
fn test_install_aws_end_to_end() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/awscli-exe-linux-x86_64.zip")
        .with_body(crate::common::aws_bundle_zip())
        .create();

    let mut kitup = KitupTest::new();
    // The bundle's install script needs a shell and coreutils.
    kitup.env.insert(
        "PATH".into(),
        format!("{}:/usr/bin:/bin", kitup.path_dir()),
    );

    let output = kitup.kitup(&[
        "install",
        "aws",
        "--yes",
        "--source-base-url",
        &server.url(),
    ]);

    output.assert_success();
    let stdout = output.normalized_stdout();
    assert!(stdout.contains("Downloading"), "{stdout}");
    assert!(
        stdout.contains("Installed the AWS CLI into /storage/cli/aws-cli"),
        "{stdout}"
    );
    assert!(kitup.install_dir().join("aws-cli/aws").exists());

    // Scratch removal is fired and forgotten; the process has exited by
    // now, so whatever survived it is a leak.
    let leftovers = match std::fs::read_dir(kitup.scratch_parent()) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    };
    assert_eq!(leftovers, 0, "scratch directories left behind");
}

#[test]
fn test_install_download_failure_points_at_manual_instructions() {
    let server = mockito::Server::new();

    let kitup = KitupTest::new();
    let output = kitup.kitup(&[
        "install",
        "aws",
        "--yes",
        "--source-base-url",
        &server.url(),
    ]);

    output.assert_failure();
    let stderr = output.stderr();
    assert!(stderr.contains("failed to install the AWS CLI"), "{stderr}");
    assert!(
        stderr.contains("https://docs.aws.amazon.com/cli/latest/userguide/getting-started-install.html"),
        "{stderr}"
    );
}
