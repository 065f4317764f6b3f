//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::io::Write;
use camino::Utf8Path;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// A category of the synthetic corpus with its skills and experience phrases.
pub struct CategoryTemplate {
    pub name: &'static str,
    pub skills: &'static [&'static str],
    pub experience: &'static [&'static str],
}

pub const CATEGORIES: &[CategoryTemplate] = &[
    CategoryTemplate {
        name: "Data Scientist",
        skills: &["Machine Learning", "Data Analysis", "Python", "Statistics", "R", "Deep Learning", "Big Data", "Data Visualization"],
        experience: &[
            "Experienced in developing machine learning models for predictive analytics.",
            "Proficient in analyzing large datasets to extract meaningful insights.",
            "Skilled in using Python libraries such as Pandas, NumPy, and Scikit-learn.",
        ],
    },
    CategoryTemplate {
        name: "Software Engineer",
        skills: &["Java", "Python", "C++", "JavaScript", "SQL", "HTML/CSS", "Django", "React", "Node.js", "Angular", "RESTful APIs"],
        experience: &[
            "Proficient in developing scalable and efficient software solutions using Java.",
            "Experienced in web development with Python and Django framework.",
            "Skilled in front-end development with React and back-end with Node.js.",
        ],
    },
    CategoryTemplate {
        name: "Project Manager",
        skills: &["Project Planning", "Team Leadership", "Communication", "Risk Management", "Agile", "Stakeholder Management", "Scrum", "Budgeting"],
        experience: &[
            "Strong expertise in project planning and execution.",
            "Experienced in leading cross-functional teams to deliver projects on time and within budget.",
            "Skilled in communication and stakeholder management.",
        ],
    },
    CategoryTemplate {
        name: "Business Analyst",
        skills: &["Requirements Analysis", "Data Modeling", "Business Process Improvement", "SQL", "Excel", "Tableau", "Business Intelligence"],
        experience: &[
            "Experienced in analyzing business processes and identifying improvement opportunities.",
            "Skilled in data modeling and SQL for querying databases.",
            "Proficient in using Tableau for data visualization and reporting.",
        ],
    },
    CategoryTemplate {
        name: "UX/UI Designer",
        skills: &["User Research", "Wireframing", "Prototyping", "UI Design", "UX Design", "Adobe XD", "Sketch", "Figma"],
        experience: &[
            "Experienced in conducting user research and creating wireframes and prototypes.",
            "Skilled in UI and UX design principles to create intuitive and user-friendly interfaces.",
            "Proficient in using design tools such as Adobe XD, Sketch, and Figma.",
        ],
    },
    CategoryTemplate {
        name: "Network Engineer",
        skills: &["Network Protocols", "Routing and Switching", "Firewalls", "Network Security", "TCP/IP", "LAN/WAN", "Cisco", "Juniper", "CCNA"],
        experience: &[
            "Skilled in designing and implementing network solutions to meet business requirements.",
            "Experienced in configuring and troubleshooting network devices such as routers and switches.",
            "Proficient in network security protocols and best practices.",
        ],
    },
    CategoryTemplate {
        name: "Mechanical Engineer",
        skills: &["CAD", "SolidWorks", "Thermodynamics", "Fluid Mechanics", "Product Design", "Manufacturing Processes", "AutoCAD", "ANSYS"],
        experience: &[
            "Experienced in using CAD software for product design and development.",
            "Skilled in thermodynamics and fluid mechanics.",
            "Proficient in manufacturing processes and material science.",
        ],
    },
    CategoryTemplate {
        name: "Electrical Engineer",
        skills: &["Circuit Design", "Electronics", "Microcontrollers", "VHDL", "PCB Design", "Embedded Systems", "Power Systems", "MATLAB"],
        experience: &[
            "Experienced in circuit design and electronics.",
            "Skilled in working with microcontrollers and embedded systems.",
            "Proficient in PCB design and power systems.",
        ],
    },
    CategoryTemplate {
        name: "Civil Engineer",
        skills: &["Structural Analysis", "AutoCAD", "Project Management", "Construction", "Geotechnical Engineering", "Surveying", "Revit", "STAAD Pro"],
        experience: &[
            "Experienced in structural analysis and project management.",
            "Skilled in using AutoCAD and other design software.",
            "Proficient in geotechnical engineering and construction management.",
        ],
    },
    CategoryTemplate {
        name: "Marketing Specialist",
        skills: &["SEO", "Content Marketing", "Social Media", "Email Marketing", "Google Analytics", "Brand Management", "PPC", "Market Research"],
        experience: &[
            "Experienced in developing and executing SEO strategies.",
            "Skilled in content marketing and social media management.",
            "Proficient in using Google Analytics and other marketing tools.",
        ],
    },
    CategoryTemplate {
        name: "Human Resources Manager",
        skills: &["Recruitment", "Employee Relations", "HR Policies", "Performance Management", "Talent Acquisition", "Onboarding", "Compensation and Benefits"],
        experience: &[
            "Experienced in recruitment and employee relations.",
            "Skilled in developing and implementing HR policies.",
            "Proficient in performance management and talent acquisition.",
        ],
    },
    CategoryTemplate {
        name: "Accountant",
        skills: &["Financial Reporting", "Tax Preparation", "Auditing", "QuickBooks", "Excel", "Budgeting", "Payroll", "Accounts Payable/Receivable"],
        experience: &[
            "Experienced in financial reporting and tax preparation.",
            "Skilled in using QuickBooks and Excel for accounting tasks.",
            "Proficient in budgeting, payroll, and accounts payable/receivable.",
        ],
    },
    CategoryTemplate {
        name: "Chemical Engineer",
        skills: &["Process Engineering", "Chemical Reactions", "Thermodynamics", "Process Design", "Safety Management", "ChemCAD", "HYSYS"],
        experience: &[
            "Experienced in process engineering and optimization.",
            "Proficient in chemical reaction engineering and thermodynamics.",
            "Skilled in using ChemCAD and HYSYS for process simulation and design.",
        ],
    },
    CategoryTemplate {
        name: "Data Analyst",
        skills: &["Data Analysis", "SQL", "Excel", "Statistics", "Reporting", "Data Visualization", "Python", "R"],
        experience: &[
            "Experienced in performing data analysis and generating insights from large datasets.",
            "Proficient in SQL for querying databases and extracting information.",
            "Skilled in data visualization using tools like Tableau and Power BI.",
        ],
    },
    CategoryTemplate {
        name: "Sales Executive",
        skills: &["Sales", "Negotiation", "Client Management", "Lead Generation", "Communication", "Marketing", "CRM"],
        experience: &[
            "Experienced in sales and client management.",
            "Skilled in lead generation and negotiation.",
            "Proficient in using CRM software for sales tracking.",
        ],
    },
    CategoryTemplate {
        name: "Web Developer",
        skills: &["HTML", "CSS", "JavaScript", "React", "Angular", "Vue.js", "Node.js", "PHP", "WordPress", "Responsive Design"],
        experience: &[
            "Experienced in developing responsive and interactive web applications.",
            "Proficient in front-end technologies like HTML, CSS, and JavaScript.",
            "Skilled in back-end development using Node.js and PHP.",
        ],
    },
    CategoryTemplate {
        name: "Application Developer",
        skills: &["Java", "Kotlin", "Swift", "Objective-C", "Android Development", "iOS Development", "Mobile App Design", "Firebase", "RESTful APIs"],
        experience: &[
            "Experienced in developing mobile applications for Android and iOS platforms.",
            "Skilled in Java and Kotlin for Android development and Swift for iOS development.",
            "Proficient in using Firebase for backend services and RESTful APIs for communication.",
        ],
    },
];

/// One generated résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntheticResume {
    #[serde(rename = "Resume")]
    pub resume: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Skills")]
    pub skills: String,
}

/// Generates [count] résumés. The same [seed] always yields the same résumés.
pub fn generate(count: usize, seed: u64) -> Vec<SyntheticResume> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut resumes = Vec::with_capacity(count);
    while resumes.len() < count {
        let Some(template) = CATEGORIES.choose(&mut rng) else {
            break;
        };
        let amount = rng.gen_range(2..=template.skills.len());
        let skills = template
            .skills
            .choose_multiple(&mut rng, amount)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let experience = template.experience.choose(&mut rng).copied().unwrap_or_default();
        resumes.push(SyntheticResume {
            resume: format!(
                "{experience} Proficient {} with a background in {}.",
                template.name.to_lowercase(),
                skills.to_lowercase()
            ),
            category: template.name.to_string(),
            skills,
        });
    }
    resumes
}

/// Writes [resumes] as a csv corpus with the columns Resume, Category and Skills.
pub fn write_csv<W: Write>(writer: W, resumes: &[SyntheticResume]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for resume in resumes {
        writer.serialize(resume)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv(path: impl AsRef<Utf8Path>, resumes: &[SyntheticResume]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(std::io::BufWriter::new(file), resumes)
}

#[cfg(test)]
mod test {
    use crate::config::TrainingConfig;
    use crate::training::corpus::Corpus;
    use super::{generate, write_csv, CATEGORIES};

    #[test]
    fn generation_is_seeded() {
        assert_eq!(generate(50, 7), generate(50, 7));
        assert_ne!(generate(50, 7), generate(50, 8));
        assert!(generate(0, 7).is_empty());
    }

    #[test]
    fn resumes_follow_their_category() {
        for resume in generate(200, 1) {
            let template = CATEGORIES
                .iter()
                .find(|template| template.name == resume.category)
                .unwrap();
            let skills = resume.skills.split(", ").collect::<Vec<_>>();
            assert!(skills.len() >= 2);
            assert!(skills.iter().all(|skill| template.skills.contains(skill)));
            assert!(resume
                .resume
                .contains(&format!("Proficient {} with a background in", template.name.to_lowercase())));
            assert!(template.experience.iter().any(|phrase| resume.resume.starts_with(phrase)));
        }
    }

    #[test]
    fn written_corpora_can_be_read() {
        let resumes = generate(20, 3);
        let mut out = Vec::new();
        write_csv(&mut out, &resumes).unwrap();
        let corpus = Corpus::read(out.as_slice(), &TrainingConfig::default()).unwrap();
        assert_eq!(corpus.len(), 20);
        assert_eq!(corpus.documents()[0].text, resumes[0].resume);
        assert_eq!(corpus.documents()[0].label, resumes[0].category);
    }
}
