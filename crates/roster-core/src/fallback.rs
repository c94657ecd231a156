//! Built-in dataset used when the fetch fails under the fallback policy.

use crate::record::{Address, Company, Geo, UserId, UserRecord};

struct FallbackRow {
    id: u64,
    name: &'static str,
    username: &'static str,
    email: &'static str,
    phone: &'static str,
    website: &'static str,
    company: &'static str,
    catch_phrase: &'static str,
    bs: &'static str,
    street: &'static str,
    suite: &'static str,
    city: &'static str,
    zipcode: &'static str,
    lat: &'static str,
    lng: &'static str,
}

impl FallbackRow {
    fn to_record(&self) -> UserRecord {
        UserRecord {
            id: UserId(self.id),
            name: self.name.to_string(),
            username: self.username.to_string(),
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            website: self.website.to_string(),
            company: Some(Company {
                name: self.company.to_string(),
                catch_phrase: self.catch_phrase.to_string(),
                bs: self.bs.to_string(),
            }),
            address: Some(Address {
                street: self.street.to_string(),
                suite: self.suite.to_string(),
                city: self.city.to_string(),
                zipcode: self.zipcode.to_string(),
                geo: Some(Geo {
                    lat: self.lat.to_string(),
                    lng: self.lng.to_string(),
                }),
            }),
        }
    }
}

const FALLBACK_ROWS: &[FallbackRow] = &[
    FallbackRow {
        id: 1,
        name: "Leanne Graham",
        username: "Bret",
        email: "Sincere@april.biz",
        phone: "1-770-736-8031 x56442",
        website: "hildegard.org",
        company: "Romaguera-Crona",
        catch_phrase: "Multi-layered client-server neural-net",
        bs: "harness real-time e-markets",
        street: "Kulas Light",
        suite: "Apt. 556",
        city: "Gwenborough",
        zipcode: "92998-3874",
        lat: "-37.3159",
        lng: "81.1496",
    },
    FallbackRow {
        id: 2,
        name: "Ervin Howell",
        username: "Antonette",
        email: "Shanna@melissa.tv",
        phone: "010-692-6593 x09125",
        website: "anastasia.net",
        company: "Deckow-Crist",
        catch_phrase: "Proactive didactic contingency",
        bs: "synergize scalable supply-chains",
        street: "Victor Plains",
        suite: "Suite 879",
        city: "Wisokyburgh",
        zipcode: "90566-7771",
        lat: "-43.9509",
        lng: "-34.4618",
    },
    FallbackRow {
        id: 3,
        name: "Clementine Bauch",
        username: "Samantha",
        email: "Nathan@yesenia.net",
        phone: "1-463-123-4447",
        website: "ramiro.info",
        company: "Romaguera-Jacobson",
        catch_phrase: "Face to face bifurcated interface",
        bs: "e-enable strategic applications",
        street: "Douglas Extension",
        suite: "Suite 847",
        city: "McKenziehaven",
        zipcode: "59590-4157",
        lat: "-68.6102",
        lng: "-47.0653",
    },
    FallbackRow {
        id: 4,
        name: "Patricia Lebsack",
        username: "Karianne",
        email: "Julianne.OConner@kory.org",
        phone: "493-170-9623 x156",
        website: "kale.biz",
        company: "Robel-Corkery",
        catch_phrase: "Multi-tiered zero tolerance productivity",
        bs: "transition cutting-edge web services",
        street: "Hoeger Mall",
        suite: "Apt. 692",
        city: "South Elvis",
        zipcode: "53919-4257",
        lat: "29.4572",
        lng: "-164.2990",
    },
    FallbackRow {
        id: 5,
        name: "Chelsey Dietrich",
        username: "Kamren",
        email: "Lucio_Hettinger@annie.ca",
        phone: "(254)954-1289",
        website: "demarco.info",
        company: "Keebler LLC",
        catch_phrase: "User-centric fault-tolerant solution",
        bs: "revolutionize end-to-end systems",
        street: "Skiles Walks",
        suite: "Suite 351",
        city: "Roscoeview",
        zipcode: "33263",
        lat: "-31.8129",
        lng: "62.5342",
    },
    FallbackRow {
        id: 6,
        name: "Mrs. Dennis Schulist",
        username: "Leopoldo_Corkery",
        email: "Karley_Dach@jasper.info",
        phone: "1-477-935-8478 x6430",
        website: "ola.org",
        company: "Considine-Lockman",
        catch_phrase: "Synchronised bottom-line interface",
        bs: "e-enable innovative applications",
        street: "Norberto Crossing",
        suite: "Apt. 950",
        city: "South Christy",
        zipcode: "23505-1337",
        lat: "-71.4197",
        lng: "71.7478",
    },
    FallbackRow {
        id: 7,
        name: "Kurtis Weissnat",
        username: "Elwyn.Skiles",
        email: "Telly.Hoeger@billy.biz",
        phone: "210.067.6132",
        website: "elvis.io",
        company: "Johns Group",
        catch_phrase: "Configurable multimedia task-force",
        bs: "generate enterprise e-tailers",
        street: "Rex Trail",
        suite: "Suite 280",
        city: "Howemouth",
        zipcode: "58804-1099",
        lat: "24.8918",
        lng: "21.8984",
    },
    FallbackRow {
        id: 8,
        name: "Nicholas Runolfsdottir V",
        username: "Maxime_Nienow",
        email: "Sherwood@rosamond.me",
        phone: "586.493.6943 x140",
        website: "jacynthe.com",
        company: "Abernathy Group",
        catch_phrase: "Implemented secondary concept",
        bs: "e-enable extensible e-tailers",
        street: "Ellsworth Summit",
        suite: "Suite 729",
        city: "Aliyaview",
        zipcode: "45169",
        lat: "-14.3990",
        lng: "-120.7677",
    },
    FallbackRow {
        id: 9,
        name: "Glenna Reichert",
        username: "Delphine",
        email: "Chaim_McDermott@dana.io",
        phone: "(775)976-6794 x41206",
        website: "conrad.com",
        company: "Yost and Sons",
        catch_phrase: "Switchable contextually-based project",
        bs: "aggregate real-time technologies",
        street: "Dayna Park",
        suite: "Suite 449",
        city: "Bartholomebury",
        zipcode: "76495-3109",
        lat: "24.6463",
        lng: "-168.8889",
    },
    FallbackRow {
        id: 10,
        name: "Clementina DuBuque",
        username: "Moriah.Stanton",
        email: "Rey.Padberg@karina.biz",
        phone: "024-648-3804",
        website: "ambrose.net",
        company: "Hoeger LLC",
        catch_phrase: "Centralized empowering task-force",
        bs: "target end-to-end models",
        street: "Kattie Turnpike",
        suite: "Suite 198",
        city: "Lebsackbury",
        zipcode: "31428-2261",
        lat: "-38.2386",
        lng: "57.2232",
    },
];

/// The ten built-in users.
pub fn fallback_users() -> Vec<UserRecord> {
    FALLBACK_ROWS.iter().map(FallbackRow::to_record).collect()
}
