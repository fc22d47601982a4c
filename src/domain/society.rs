use crate::domain::IMAGE_MARKER;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Member {
    pub name: &'static str,
    pub role: &'static str,
    pub email: &'static str,
    pub image: &'static str,
    pub bio: &'static str,
}

pub const COORDINATORS: &[Member] = &[
    Member {
        name: "Rahul Kumar",
        role: "CyberSec Head",
        email: "rahul@geekhaven.com",
        image: "/team/rahul.jpg",
        bio: "Penetration testing specialist with expertise in web application security and network exploitation. Led multiple CTF teams to victory.",
    },
    Member {
        name: "Priya Sharma",
        role: "CyberSec Vice Head",
        email: "priya@geekhaven.com",
        image: "/team/priya.jpg",
        bio: "Security researcher specializing in reverse engineering and malware analysis. Active contributor to security disclosure programs.",
    },
    Member {
        name: "Amit Patel",
        role: "CTF Coordinator",
        email: "amit@geekhaven.com",
        image: "/team/amit.jpg",
        bio: "Capture The Flag enthusiast and cryptography expert. Organizes workshops on binary exploitation and web security.",
    },
];

pub const MEMBERS: &[Member] = &[
    Member {
        name: "Rohan Verma",
        role: "Senior Member",
        email: "rohan@geekhaven.com",
        image: "/team/rohan.jpg",
        bio: "Bug bounty hunter with multiple CVEs. Focuses on API security and authentication bypass techniques.",
    },
    Member {
        name: "Sneha Reddy",
        role: "Senior Member",
        email: "sneha@geekhaven.com",
        image: "/team/sneha.jpg",
        bio: "Network security specialist with expertise in firewall configuration and intrusion detection systems.",
    },
    Member {
        name: "Arjun Singh",
        role: "Senior Member",
        email: "arjun@geekhaven.com",
        image: "/team/arjun.jpg",
        bio: "Digital forensics enthusiast. Works on incident response and forensic analysis of compromised systems.",
    },
    Member {
        name: "Kavya Iyer",
        role: "Member",
        email: "kavya@geekhaven.com",
        image: "/team/kavya.jpg",
        bio: "Security automation developer. Creates custom tools for vulnerability scanning and exploit development.",
    },
    Member {
        name: "Vikram Joshi",
        role: "Member",
        email: "vikram@geekhaven.com",
        image: "/team/vikram.jpg",
        bio: "Cloud security researcher focusing on AWS and Azure security misconfigurations and container security.",
    },
    Member {
        name: "Diya Kapoor",
        role: "Member",
        email: "diya@geekhaven.com",
        image: "/team/diya.jpg",
        bio: "Mobile application security tester. Specializes in Android and iOS reverse engineering and exploitation.",
    },
    Member {
        name: "Aditya Mehta",
        role: "Member",
        email: "aditya@geekhaven.com",
        image: "/team/aditya.jpg",
        bio: "Wireless security researcher. Explores vulnerabilities in WiFi protocols and IoT device security.",
    },
];

pub const SOCIETY_NAME: &str = "CyberSec Division";
pub const SOCIETY_LEAD: &str = "Rahul Kumar";

pub const SOCIETY_DESCRIPTION: &str = "\
The CyberSec Division at GeekHaven is dedicated to exploring the depths of
cybersecurity, ethical hacking, and digital defense. We cultivate a community of
security researchers, penetration testers, and CTF enthusiasts who are passionate
about understanding and securing digital systems.

Our members engage in:
* Capture The Flag competitions and security challenges
* Vulnerability research and responsible disclosure
* Development of security tools and automation scripts
* Workshops on penetration testing, cryptography, and forensics
* Bug bounty programs and security audits";

pub const ACHIEVEMENTS: &[&str] = &[
    "Winners - National Cybersecurity CTF 2024",
    "2nd Place - HackTheBox University CTF",
    "10+ CVEs discovered and responsibly disclosed",
    "Conducted 50+ security workshops",
    "$25,000+ earned through bug bounties",
];

pub fn find_coordinator(query: &str) -> Option<&'static Member> {
    find_by_name(COORDINATORS, query)
}

pub fn find_member(query: &str) -> Option<&'static Member> {
    find_by_name(MEMBERS, query)
}

fn find_by_name(roster: &'static [Member], query: &str) -> Option<&'static Member> {
    let query = query.to_lowercase();
    roster
        .iter()
        .find(|member| member.name.to_lowercase().contains(&query))
}

pub fn format_coordinators() -> String {
    let mut out = String::from("LEADERSHIP TEAM 2024-25\n=======================\n\n");
    for (index, coordinator) in COORDINATORS.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", index + 1, coordinator.name));
        out.push_str(&format!("    Role: {}\n", coordinator.role));
        out.push_str(&format!("    Email: {}\n", coordinator.email));
        out.push_str("    --------------------------------\n");
    }
    out.push_str("\nUse \"info-coordinators [name]\" to see profile photo.\n");
    out
}

pub fn format_members() -> String {
    let mut out = format!("Active Members: {}\n==================\n\n", MEMBERS.len());
    for (index, member) in MEMBERS.iter().enumerate() {
        out.push_str(&format!(
            "[{}] {:<20} - {}\n",
            index + 1,
            member.name,
            member.role
        ));
    }
    out.push_str("\nUse \"info-members [name]\" to view profile.\n");
    out
}

pub fn format_coordinator_profile(member: &Member) -> String {
    format!(
        "{IMAGE_MARKER}{}\n\nName : {}\nRole : {}\nEmail: {}\nBio  : {}\n",
        member.image, member.name, member.role, member.email, member.bio
    )
}

pub fn format_member_profile(member: &Member) -> String {
    format!(
        "{IMAGE_MARKER}{}\n\nName : {}\nRole : {}\nEmail: {}\n",
        member.image, member.name, member.role, member.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutputLine;

    #[test]
    fn lookup_is_case_insensitive_substring() {
        assert_eq!(find_coordinator("priya").map(|m| m.name), Some("Priya Sharma"));
        assert_eq!(find_member("VERMA").map(|m| m.name), Some("Rohan Verma"));
        assert!(find_member("nobody").is_none());
    }

    #[test]
    fn profile_starts_with_an_image_line() {
        let member = &COORDINATORS[0];
        let profile = format_coordinator_profile(member);
        let first = profile.lines().next().expect("first line");

        assert_eq!(
            OutputLine::parse(first),
            OutputLine::Image {
                path: member.image.to_string()
            }
        );
    }

    #[test]
    fn rosters_render_every_entry() {
        let coordinators = format_coordinators();
        for coordinator in COORDINATORS {
            assert!(coordinators.contains(coordinator.name));
        }

        let members = format_members();
        for member in MEMBERS {
            assert!(members.contains(member.name));
        }
        assert!(members.starts_with("Active Members: 7"));
    }
}
