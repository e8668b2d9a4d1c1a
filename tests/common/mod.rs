//! Shared fixtures for integration tests.

use stanza_gateway::stanza::{parse_all, Stanza};

/// Three stanzas in the canonical rendered layout.
#[allow(dead_code)]
pub const CANONICAL: &str = "\
#### Sage Knowledge START ####
Group Default
Title Sage Knowledge
URL http://knowledge.sagepub.com
#### Sage Knowledge END   ####

#### IPA Source START ####
Group Default
Title IPA Source
URL https://www.ipasource.com
#### IPA Source END   ####

#### Mango for Libraries - Chicago START ####
Group Default
Title Mango for Libraries - Chicago
URL https://connect.mangolanguages.com/mbicl/start
DomainJavascript mangolanguages.com
DomainJavascript libraries.mangolanguages.com
HostJavascript http://libraries.mangolanguages.com/mbicl/start
#### Mango for Libraries - Chicago END   ####
";

/// A hand-maintained file: banners, comments, indentation, shortcuts, groups.
pub const HAND_WRITTEN: &str = "
        # This file contains database stanzas for resources only available
        # MAIN and DL students

            ####################################################################
            ###############   EBOOK TYPE RESOURCES    ##########################
            ####################################################################

            #### Sage Knowledge START #####
            Title Sage Knowledge
            URL http://knowledge.sagepub.com
            #### Sage Knowledge  END ####

            #### IPA Source START ####
            Group Music
            Title IPA Source
            # moved to https in 2019
            URL https://www.ipasource.com
            #### IPA Source END ####

            #### Mango for Libraries START ####
            T Mango for Libraries - Chicago
            U https://connect.mangolanguages.com/mbicl/start
            DJ mangolanguages.com
            DJ libraries.mangolanguages.com
            HJ http://libraries.mangolanguages.com/mbicl/start
            #### Mango for Libraries END ####

            #### Vendor include START ####
            IncludeFile stanzas/vendors/jstor.txt
            #### Vendor include END ####
            ";

#[allow(dead_code)]
pub fn hand_written() -> Vec<Stanza> {
    parse_all(HAND_WRITTEN).expect("fixture parses")
}
