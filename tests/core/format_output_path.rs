//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use hinglish::core::format_output_path;

    #[test]
    fn as_is() {
        let final_destination = format_output_path(
            "/home/username/Downloads/website.html",
            Some(""),
        );

        assert_eq!(final_destination, "/home/username/Downloads/website.html");
    }

    #[test]
    fn substitute_title() {
        let final_destination = format_output_path(
            "/home/username/Downloads/%title%.html",
            Some("Document Title"),
        );

        assert_eq!(
            final_destination,
            "/home/username/Downloads/Document Title.html"
        );
    }

    #[test]
    fn substitute_title_multi() {
        let final_destination = format_output_path(
            "/home/username/Downloads/%title%/%title%.html",
            Some("Document Title"),
        );

        assert_eq!(
            final_destination,
            "/home/username/Downloads/Document Title/Document Title.html"
        );
    }

    #[test]
    fn sanitize() {
        let final_destination = format_output_path(
            r#"/home/username/Downloads/<>:"|?/%title%.html"#,
            Some(r#"/\<>:"|?"#),
        );

        assert_eq!(
            final_destination,
            r#"/home/username/Downloads/<>:"|?/__[] - -.html"#
        );
    }

    #[test]
    fn level_up() {
        let final_destination = format_output_path("../%title%.html", Some(".Title"));

        assert_eq!(final_destination, r#"../Title.html"#);
    }

    #[test]
    fn file_name_extension() {
        let final_destination = format_output_path("%title%.%extension%", Some("Title"));

        assert_eq!(final_destination, r#"Title.html"#);
    }

    #[test]
    fn timestamp_has_no_colons() {
        let final_destination = format_output_path("%title%-%timestamp%.html", Some("Title"));

        assert!(final_destination.starts_with("Title-"));
        assert!(final_destination.ends_with("Z.html"));
        assert!(!final_destination.contains(':'));
    }

    #[test]
    fn file_name_extension_short() {
        let final_destination = format_output_path("%title%.%ext%", Some("Title"));

        assert_eq!(final_destination, r#"Title.htm"#);
    }
}
